//! 메시지 필드 추출기
//!
//! 메시지에 박혀 있는 `key:value` 메타데이터를 꺼내 구조화 필드로 옮깁니다.
//!
//! # 문법
//! ```text
//! base_message (" | " segment)*
//! segment = 공백으로 구분된 key:value 토큰 목록 (첫 콜론이 구분자)
//! ```
//!
//! - `correlation_id` 키는 상관 ID가 됩니다 (빈 값은 무시).
//! - 키에 `_ms`, `_mb`, `_size`, `time` 중 하나가 들어 있으면 성능 지표로
//!   보고 유한한 실수로 파싱합니다. 파싱에 실패하면 context로 강등됩니다.
//! - 그 밖의 키는 context에 문자열로 저장됩니다.
//! - 콜론이 없는 토큰은 조용히 무시됩니다.
//!
//! 같은 키는 나중 토큰이 이기며, 이 규칙은 context와 performance 두 맵에
//! 걸쳐 적용되므로 한 키는 둘 중 하나에만 존재합니다.
//!
//! 추출은 어떤 입력에도 실패하지 않는 전함수입니다.

use std::collections::BTreeMap;

use geolog_core::metrics as m;
use geolog_core::types::LogRecord;

/// 세그먼트 구분자
pub const SEGMENT_DELIMITER: &str = " | ";

/// 상관 ID 키
pub const CORRELATION_ID_KEY: &str = "correlation_id";

/// 성능 지표 키로 판정하는 부분 문자열
pub const METRIC_KEY_MARKERS: [&str; 4] = ["_ms", "_mb", "_size", "time"];

/// 메시지에서 추출한 필드
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    /// 메타데이터 세그먼트를 제거한 기본 메시지
    pub message: String,
    /// 상관 ID (마지막 값)
    pub correlation_id: Option<String>,
    /// 숫자가 아닌 필드
    pub context: BTreeMap<String, String>,
    /// 성능 지표
    pub performance: BTreeMap<String, f64>,
}

impl ExtractedFields {
    /// 추출된 메타데이터가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.correlation_id.is_none() && self.context.is_empty() && self.performance.is_empty()
    }

    fn set_context(&mut self, key: &str, value: &str) {
        self.performance.remove(key);
        self.context.insert(key.to_owned(), value.to_owned());
    }

    fn set_metric(&mut self, key: &str, value: f64) {
        self.context.remove(key);
        self.performance.insert(key.to_owned(), value);
    }
}

/// 키가 성능 지표 키인지 판정합니다.
pub fn is_metric_key(key: &str) -> bool {
    METRIC_KEY_MARKERS.iter().any(|marker| key.contains(marker))
}

fn parse_metric(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 메시지에서 필드를 추출합니다.
///
/// 구분자가 없으면 메시지를 그대로 돌려주고 나머지 필드는 비어 있습니다.
pub fn extract(message: &str) -> ExtractedFields {
    let mut segments = message.split(SEGMENT_DELIMITER);
    let base = segments.next().unwrap_or_default();

    let mut fields = ExtractedFields {
        message: base.to_owned(),
        ..Default::default()
    };

    for token in segments.flat_map(str::split_whitespace) {
        let Some((key, value)) = token.split_once(':') else {
            continue;
        };

        if key == CORRELATION_ID_KEY {
            // 값이 빈 토큰은 상관 ID를 지우지 않는다
            if !value.is_empty() {
                fields.correlation_id = Some(value.to_owned());
            }
        } else if is_metric_key(key) {
            match parse_metric(value) {
                Some(v) => fields.set_metric(key, v),
                None => {
                    tracing::debug!(key, value, "non-numeric metric value demoted to context");
                    metrics::counter!(m::PIPELINE_METRIC_DEMOTIONS_TOTAL).increment(1);
                    fields.set_context(key, value);
                }
            }
        } else {
            fields.set_context(key, value);
        }
    }

    fields
}

/// 레코드의 메시지에서 필드를 추출해 레코드에 반영합니다.
///
/// 메시지는 기본 메시지로 교체됩니다. 디코더가 채운 상관 ID는 메시지에
/// 상관 ID가 없을 때만 유지됩니다.
pub fn apply(mut record: LogRecord) -> LogRecord {
    if !record.message.contains(SEGMENT_DELIMITER) {
        return record;
    }

    let fields = extract(&record.message);
    record.message = fields.message;
    if fields.correlation_id.is_some() {
        record.correlation_id = fields.correlation_id;
    }
    for (key, value) in fields.context {
        record.performance.remove(&key);
        record.context.insert(key, value);
    }
    for (key, value) in fields.performance {
        record.context.remove(&key);
        record.performance.insert(key, value);
    }
    record
}
