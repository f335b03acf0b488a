//! 작업 유형 분류 규칙
//!
//! `GeocodingAPI` 로거의 레코드만 분류합니다. 메시지를 소문자로 바꾼 뒤
//! `"geocod"`, `"reverse"`, `"http"` 순서로 검사하고 처음 일치한 유형을
//! 사용합니다. 두 단어가 모두 들어 있는 메시지는 `geocoding`이 됩니다.

use geolog_core::pipeline::EnrichmentRule;
use geolog_core::types::{LogRecord, OperationType};

/// 분류 대상 로거 이름
pub const GEOCODING_LOGGER: &str = "GeocodingAPI";

/// 검사 순서대로 나열한 (부분 문자열, 작업 유형)
const CLASSIFICATION_ORDER: [(&str, OperationType); 3] = [
    ("geocod", OperationType::Geocoding),
    ("reverse", OperationType::ReverseGeocoding),
    ("http", OperationType::HttpRequest),
];

/// 작업 유형 분류기
#[derive(Debug, Clone, Default)]
pub struct OperationClassifier;

impl OperationClassifier {
    /// 메시지를 분류합니다.
    pub fn classify(message: &str) -> Option<OperationType> {
        let lowered = message.to_lowercase();
        CLASSIFICATION_ORDER
            .iter()
            .find(|(needle, _)| lowered.contains(needle))
            .map(|(_, op)| *op)
    }
}

impl EnrichmentRule for OperationClassifier {
    fn name(&self) -> &str {
        "operation_type"
    }

    fn apply(&self, mut record: LogRecord) -> LogRecord {
        if record.logger != GEOCODING_LOGGER {
            return record;
        }
        if let Some(op) = Self::classify(&record.message) {
            record.set_operation_type(op);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_record(logger: &str, message: &str) -> Option<OperationType> {
        OperationClassifier
            .apply(LogRecord::new("t", "info", logger, message))
            .operation_type
    }

    #[test]
    fn geocoding_messages() {
        assert_eq!(
            classify_record("GeocodingAPI", "Geocoding successful"),
            Some(OperationType::Geocoding)
        );
        assert_eq!(
            classify_record("GeocodingAPI", "GEOCODER timeout"),
            Some(OperationType::Geocoding)
        );
    }

    #[test]
    fn geocod_takes_priority_over_reverse() {
        assert_eq!(
            classify_record("GeocodingAPI", "Reverse geocoding request"),
            Some(OperationType::Geocoding)
        );
    }

    #[test]
    fn reverse_without_geocod() {
        assert_eq!(
            classify_record("GeocodingAPI", "Reverse lookup for 37.42,-122.08"),
            Some(OperationType::ReverseGeocoding)
        );
    }

    #[test]
    fn http_request() {
        assert_eq!(
            classify_record("GeocodingAPI", "HTTP request completed"),
            Some(OperationType::HttpRequest)
        );
    }

    #[test]
    fn unmatched_message_is_unclassified() {
        assert_eq!(classify_record("GeocodingAPI", "Cache warmed"), None);
    }

    #[test]
    fn other_loggers_are_ignored() {
        assert_eq!(classify_record("HttpServer", "HTTP request completed"), None);
        assert_eq!(classify_record("geocodingapi", "Geocoding successful"), None);
    }

    #[test]
    fn seeded_operation_type_survives_when_unclassified() {
        let mut record = LogRecord::new("t", "info", "GeocodingAPI", "Cache warm");
        record.operation_type = Some(OperationType::HttpRequest);
        let record = OperationClassifier.apply(record);
        assert_eq!(record.operation_type, Some(OperationType::HttpRequest));

        let mut record = LogRecord::new("t", "info", "GeocodingAPI", "Geocoding successful");
        record
            .attributes
            .insert("operation_type".to_owned(), serde_json::json!("batch"));
        let record = OperationClassifier.apply(record);
        assert_eq!(record.operation_type, Some(OperationType::Geocoding));
        assert!(!record.attributes.contains_key("operation_type"));
    }

    #[test]
    fn classifies_base_message_after_extraction() {
        let record = crate::extract::apply(LogRecord::new(
            "t",
            "info",
            "GeocodingAPI",
            "Request done | endpoint:/geocode",
        ));
        assert_eq!(record.message, "Request done");
        assert_eq!(OperationClassifier.apply(record).operation_type, None);
    }
}
