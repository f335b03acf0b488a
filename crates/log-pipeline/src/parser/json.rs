//! JSON 레코드 디코더
//!
//! 한 줄짜리 JSON 객체 로그를 기본 [`LogRecord`]로 변환합니다.
//! 필드 이름 매핑을 통해 `timestamp`, `level`, `logger`, `message` 이외의
//! 이름을 쓰는 로그 라이브러리도 지원합니다.
//!
//! # 필드 처리 규칙
//! - 매핑된 네 필드는 문자열로 변환되어 이름 있는 필드에 들어갑니다
//!   (숫자와 불리언은 문자열화).
//! - `correlation_id` 문자열과 `tags` 문자열 배열은 레코드의 초기값이 됩니다.
//! - `context`/`performance` 객체는 각 맵의 초기값이 되고, 메시지에서
//!   추출한 토큰이 그 위에 덮어씁니다. 숫자로 읽을 수 없는 성능 값은
//!   `context`로 옮겨집니다.
//! - `alert`/`operation_type`은 알려진 레이블이면 이름 있는 필드의 초기값이
//!   되고, 아니면 같은 이름으로 `attributes`에 남습니다. 규칙이 값을 정하면
//!   규칙의 값이 이깁니다.
//! - 보강 단계가 항상 덮어쓰는 필드(`service`, `environment`, `version`,
//!   `line_number`, `@timestamp`)는 버립니다.
//! - 레코드 필드 이름과 겹치지만 위 규칙으로 옮길 수 없는 값은
//!   `payload_` 접두어를 붙여 `attributes`에 보관합니다.
//! - 나머지 최상위 필드는 JSON 값 그대로 `attributes`에 보관됩니다.
//!
//! # 사용 예시
//! ```ignore
//! use geolog_log_pipeline::parser::JsonRecordDecoder;
//! use geolog_core::pipeline::RecordDecoder;
//!
//! let decoder = JsonRecordDecoder::default();
//! let line = r#"{"timestamp":"2024-01-15T12:00:00Z","level":"info","logger":"GeocodingAPI","message":"ok"}"#;
//! let record = decoder.decode(line)?;
//! assert_eq!(record.logger, "GeocodingAPI");
//! ```

use std::collections::BTreeMap;

use geolog_core::config::DEFAULT_MAX_LINE_BYTES;
use geolog_core::error::GeologError;
use geolog_core::pipeline::RecordDecoder;
use geolog_core::types::{AlertLabel, DEFAULT_LEVEL, LogRecord, OperationType, RECORD_FIELDS};

use crate::error::LogPipelineError;

/// 디코더 형식 이름
pub const JSON_FORMAT: &str = "json";

/// 보강 단계가 항상 덮어쓰므로 페이로드에서 버리는 필드 이름
pub const RESERVED_FIELDS: &[&str] = &[
    "service",
    "environment",
    "version",
    "line_number",
    "@timestamp",
];

/// 레코드 필드와 이름이 겹치는 페이로드 값에 붙이는 접두어
pub const SHADOWED_FIELD_PREFIX: &str = "payload_";

const CORRELATION_ID_FIELD: &str = "correlation_id";
const TAGS_FIELD: &str = "tags";
const CONTEXT_FIELD: &str = "context";
const PERFORMANCE_FIELD: &str = "performance";
const ALERT_FIELD: &str = "alert";
const OPERATION_TYPE_FIELD: &str = "operation_type";

/// JSON 로그 필드 매핑 설정
///
/// JSON 로그의 필드 이름을 `LogRecord`의 기본 필드에 매핑합니다.
#[derive(Debug, Clone)]
pub struct JsonFieldMapping {
    /// 타임스탬프 필드명 (기본: "timestamp")
    pub timestamp_field: String,
    /// 레벨 필드명 (기본: "level")
    pub level_field: String,
    /// 로거 필드명 (기본: "logger")
    pub logger_field: String,
    /// 메시지 필드명 (기본: "message")
    pub message_field: String,
}

impl Default for JsonFieldMapping {
    fn default() -> Self {
        Self {
            timestamp_field: "timestamp".to_owned(),
            level_field: "level".to_owned(),
            logger_field: "logger".to_owned(),
            message_field: "message".to_owned(),
        }
    }
}

impl JsonFieldMapping {
    fn is_mapped(&self, key: &str) -> bool {
        key == self.timestamp_field
            || key == self.level_field
            || key == self.logger_field
            || key == self.message_field
    }
}

/// JSON 레코드 디코더
pub struct JsonRecordDecoder {
    /// 필드 매핑 설정
    mapping: JsonFieldMapping,
    /// 구조화 디코딩을 시도할 최대 라인 크기 (바이트)
    max_line_bytes: usize,
}

impl JsonRecordDecoder {
    /// 커스텀 필드 매핑으로 새 디코더를 생성합니다.
    pub fn new(mapping: JsonFieldMapping) -> Self {
        Self {
            mapping,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }

    /// 최대 라인 크기를 설정합니다.
    pub fn with_max_line_bytes(mut self, size: usize) -> Self {
        self.max_line_bytes = size;
        self
    }

    /// JSON 값을 필드 문자열로 변환합니다.
    ///
    /// `null`은 값이 없는 것으로 봅니다.
    fn value_to_string(value: &serde_json::Value) -> Option<String> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    fn extract_string(
        obj: &serde_json::Map<String, serde_json::Value>,
        field: &str,
    ) -> Option<String> {
        obj.get(field).and_then(Self::value_to_string)
    }

    fn extract_tags(value: &serde_json::Value) -> Vec<String> {
        match value {
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn seed_context(record: &mut LogRecord, map: serde_json::Map<String, serde_json::Value>) {
        for (key, val) in map {
            if let Some(text) = Self::value_to_string(&val) {
                record.performance.remove(&key);
                record.context.insert(key, text);
            }
        }
    }

    fn seed_performance(record: &mut LogRecord, map: serde_json::Map<String, serde_json::Value>) {
        for (key, val) in map {
            let number = match &val {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.parse::<f64>().ok(),
                _ => None,
            }
            .filter(|v| v.is_finite());

            match number {
                Some(v) => {
                    record.context.remove(&key);
                    record.performance.insert(key, v);
                }
                None => {
                    if let Some(text) = Self::value_to_string(&val) {
                        record.performance.remove(&key);
                        record.context.insert(key, text);
                    }
                }
            }
        }
    }

    fn parse_json(&self, line: &str) -> Result<LogRecord, LogPipelineError> {
        if line.len() > self.max_line_bytes {
            return Err(LogPipelineError::Parse {
                format: JSON_FORMAT.to_owned(),
                offset: 0,
                reason: format!(
                    "input too large: {} bytes (max: {})",
                    line.len(),
                    self.max_line_bytes
                ),
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(line).map_err(|e| LogPipelineError::Parse {
                format: JSON_FORMAT.to_owned(),
                offset: e.column(),
                reason: e.to_string(),
            })?;

        let serde_json::Value::Object(obj) = value else {
            return Err(LogPipelineError::Parse {
                format: JSON_FORMAT.to_owned(),
                offset: 0,
                reason: "expected JSON object at top level".to_owned(),
            });
        };

        let timestamp = Self::extract_string(&obj, &self.mapping.timestamp_field)
            .unwrap_or_else(super::now_timestamp);
        let level = Self::extract_string(&obj, &self.mapping.level_field)
            .unwrap_or_else(|| DEFAULT_LEVEL.to_owned());
        let logger = Self::extract_string(&obj, &self.mapping.logger_field).unwrap_or_default();
        let message = Self::extract_string(&obj, &self.mapping.message_field).unwrap_or_default();

        let mut record = LogRecord::new(timestamp, level, logger, message);
        let mut attributes = BTreeMap::new();

        let mut shadowed = Vec::new();

        for (key, val) in obj {
            if self.mapping.is_mapped(&key) || RESERVED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            match (key.as_str(), val) {
                (CORRELATION_ID_FIELD, val) => {
                    record.correlation_id = Self::value_to_string(&val);
                }
                (TAGS_FIELD, val) => record.tags = Self::extract_tags(&val),
                (CONTEXT_FIELD, serde_json::Value::Object(map)) => {
                    Self::seed_context(&mut record, map);
                }
                (PERFORMANCE_FIELD, serde_json::Value::Object(map)) => {
                    Self::seed_performance(&mut record, map);
                }
                (ALERT_FIELD, val) => match serde_json::from_value::<AlertLabel>(val.clone()) {
                    Ok(label) => record.alert = Some(label),
                    Err(_) => {
                        attributes.insert(key, val);
                    }
                },
                (OPERATION_TYPE_FIELD, val) => {
                    match serde_json::from_value::<OperationType>(val.clone()) {
                        Ok(op) => record.operation_type = Some(op),
                        Err(_) => {
                            attributes.insert(key, val);
                        }
                    }
                }
                (name, val) if RECORD_FIELDS.contains(&name) => {
                    shadowed.push((format!("{}{}", SHADOWED_FIELD_PREFIX, name), val));
                }
                (_, val) => {
                    attributes.insert(key, val);
                }
            }
        }

        // 페이로드에 같은 이름의 키가 이미 있으면 그 값을 유지한다
        for (key, val) in shadowed {
            attributes.entry(key).or_insert(val);
        }

        record.attributes = attributes;
        Ok(record)
    }
}

impl Default for JsonRecordDecoder {
    fn default() -> Self {
        Self::new(JsonFieldMapping::default())
    }
}

impl RecordDecoder for JsonRecordDecoder {
    fn format_name(&self) -> &str {
        JSON_FORMAT
    }

    fn decode(&self, line: &str) -> Result<LogRecord, GeologError> {
        self.parse_json(line).map_err(GeologError::from)
    }
}
