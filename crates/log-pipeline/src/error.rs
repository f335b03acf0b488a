//! 로그 파이프라인 에러 타입
//!
//! [`LogPipelineError`]는 로그 파이프라인 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<LogPipelineError> for GeologError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.
//!
//! 디코딩 실패와 숫자 파싱 실패는 파이프라인 안에서 복구되므로
//! 이 타입으로 호출자에게 전달되는 경우는 입력 소스, 설정, 저장소 에러뿐입니다.

use geolog_core::error::{ConfigError, GeologError, ParseError, PipelineError};

/// 로그 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum LogPipelineError {
    /// 레코드 디코딩 실패
    #[error("parse error: {format} at offset {offset}: {reason}")]
    Parse {
        /// 디코더 형식 (json 등)
        format: String,
        /// 실패 위치 (바이트 오프셋)
        offset: usize,
        /// 실패 사유
        reason: String,
    },

    /// 입력 소스 에러 (파일 없음, 읽기 실패 등)
    #[error("collector error: {source_type}: {reason}")]
    Collector {
        /// 입력 소스 유형 (file 등)
        source_type: String,
        /// 에러 사유
        reason: String,
    },

    /// 저장소 순서 불변식 위반
    #[error("record out of order: line_number {got} after {last}")]
    OutOfOrder {
        /// 마지막으로 적재된 라인 번호
        last: u64,
        /// 거부된 라인 번호
        got: u64,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 직렬화 에러
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LogPipelineError> for GeologError {
    fn from(err: LogPipelineError) -> Self {
        match err {
            LogPipelineError::Parse { offset, reason, .. } => {
                GeologError::Parse(ParseError::Failed { offset, reason })
            }
            LogPipelineError::Collector { .. } => {
                GeologError::Pipeline(PipelineError::SourceUnavailable(err.to_string()))
            }
            LogPipelineError::OutOfOrder { .. } => {
                GeologError::Pipeline(PipelineError::Store(err.to_string()))
            }
            LogPipelineError::Config { field, reason } => {
                GeologError::Config(ConfigError::InvalidValue { field, reason })
            }
            LogPipelineError::Io(e) => GeologError::Io(e),
            LogPipelineError::Serialize(_) => {
                GeologError::Pipeline(PipelineError::InitFailed(err.to_string()))
            }
        }
    }
}
