//! 레코드 디코딩 모듈 -- 원시 라인을 기본 레코드로 변환
//!
//! [`ParserRouter`]는 등록된 디코더를 순서대로 시도하고, 모두 실패하면
//! 라인을 버리지 않고 대체(raw) 레코드를 만듭니다. 디코딩 실패는
//! 파이프라인 밖으로 전파되지 않습니다.
//!
//! 각 디코더는 core의 [`RecordDecoder`] trait을 구현합니다.
//!
//! # 지원 형식
//! - 구조화 JSON ([`JsonRecordDecoder`])
//!
//! # 사용 예시
//! ```ignore
//! use geolog_log_pipeline::parser::{DecodeOutcome, ParserRouter};
//!
//! let router = ParserRouter::with_defaults(1024 * 1024);
//! match router.decode_or_fallback("plain text line") {
//!     DecodeOutcome::Structured(record) => println!("{}", record),
//!     DecodeOutcome::Fallback(record) => assert_eq!(record.logger, "raw"),
//! }
//! ```

pub mod json;

pub use json::{JsonFieldMapping, JsonRecordDecoder};

use chrono::{SecondsFormat, Utc};
use geolog_core::error::{GeologError, ParseError};
use geolog_core::pipeline::RecordDecoder;
use geolog_core::types::{DEFAULT_LEVEL, LogRecord, RAW_LOGGER};

/// 현재 시각을 RFC 3339 (UTC, `Z`) 문자열로 반환합니다.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 구조화 디코딩에 실패한 라인으로 최소 레코드를 만듭니다.
///
/// `level = info`, `logger = raw`, 메시지는 앞뒤 공백을 제거한 원시 라인,
/// 타임스탬프는 처리 시각입니다.
pub fn fallback_record(line: &str) -> LogRecord {
    LogRecord::new(now_timestamp(), DEFAULT_LEVEL, RAW_LOGGER, line.trim())
}

/// 한 라인의 디코딩 결과
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// 구조화 디코딩 성공
    Structured(LogRecord),
    /// 디코딩 실패 후 복구된 대체 레코드
    Fallback(LogRecord),
}

impl DecodeOutcome {
    /// 대체 레코드인지 확인합니다.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// 레코드를 꺼냅니다.
    pub fn into_record(self) -> LogRecord {
        match self {
            Self::Structured(record) | Self::Fallback(record) => record,
        }
    }
}

/// 디코더 라우터 -- 등록된 디코더를 순서대로 시도합니다.
///
/// 첫 번째로 디코딩에 성공한 디코더의 결과를 사용합니다.
pub struct ParserRouter {
    /// 등록된 디코더 목록 (순서대로 시도)
    decoders: Vec<Box<dyn RecordDecoder>>,
}

impl ParserRouter {
    /// 디코더가 없는 라우터를 생성합니다.
    ///
    /// 이 상태에서는 모든 라인이 대체 레코드가 됩니다.
    pub fn new() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// 기본 디코더 세트 (JSON)로 라우터를 생성합니다.
    pub fn with_defaults(max_line_bytes: usize) -> Self {
        Self::new().register(Box::new(
            JsonRecordDecoder::default().with_max_line_bytes(max_line_bytes),
        ))
    }

    /// 디코더를 등록합니다. 등록 순서대로 시도됩니다.
    pub fn register(mut self, decoder: Box<dyn RecordDecoder>) -> Self {
        self.decoders.push(decoder);
        self
    }

    /// 원시 라인을 디코딩합니다.
    ///
    /// 모든 디코더가 실패하면 마지막 에러를 반환합니다.
    pub fn parse(&self, line: &str) -> Result<LogRecord, GeologError> {
        let mut last_error = None;

        for decoder in &self.decoders {
            match decoder.decode(line) {
                Ok(record) => return Ok(record),
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ParseError::UnsupportedFormat("no decoders registered".to_owned()).into()
        }))
    }

    /// 특정 형식 이름의 디코더로 직접 디코딩합니다.
    pub fn parse_with(&self, format_name: &str, line: &str) -> Result<LogRecord, GeologError> {
        self.decoders
            .iter()
            .find(|d| d.format_name() == format_name)
            .ok_or_else(|| ParseError::UnsupportedFormat(format_name.to_owned()).into())
            .and_then(|d| d.decode(line))
    }

    /// 원시 라인을 디코딩하고, 실패하면 대체 레코드로 복구합니다.
    pub fn decode_or_fallback(&self, line: &str) -> DecodeOutcome {
        match self.parse(line) {
            Ok(record) => DecodeOutcome::Structured(record),
            Err(e) => {
                tracing::debug!(error = %e, "structured decoding failed, keeping raw line");
                DecodeOutcome::Fallback(fallback_record(line))
            }
        }
    }

    /// 등록된 디코더 형식 이름 목록을 반환합니다.
    pub fn registered_formats(&self) -> Vec<&str> {
        self.decoders.iter().map(|d| d.format_name()).collect()
    }
}

impl Default for ParserRouter {
    fn default() -> Self {
        Self::with_defaults(geolog_core::config::DEFAULT_MAX_LINE_BYTES)
    }
}
