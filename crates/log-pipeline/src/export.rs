//! 검색 엔진 문서 내보내기
//!
//! 보강된 레코드를 색인용 JSON 문서로 변환합니다. 문서는 레코드의
//! 직렬화 결과에 `timestamp`를 복사한 `@timestamp` 필드를 더한 것입니다.

use std::io::Write;

use geolog_core::types::LogRecord;

use crate::error::LogPipelineError;

/// 색인 엔진이 사용하는 타임스탬프 필드 이름
pub const INDEX_TIMESTAMP_FIELD: &str = "@timestamp";

/// 레코드를 색인 문서로 변환합니다.
///
/// 이름 있는 필드가 항상 이깁니다. `attributes`의 키가 직렬화된 필드와
/// 겹치면 그 값은 비어 있는 자리에만 들어갑니다.
pub fn to_document(record: &LogRecord) -> Result<serde_json::Value, LogPipelineError> {
    let mut named = record.clone();
    let attributes = std::mem::take(&mut named.attributes);

    let mut doc = serde_json::to_value(&named)?;
    if let serde_json::Value::Object(ref mut obj) = doc {
        for (key, value) in attributes {
            obj.entry(key).or_insert(value);
        }
        obj.insert(
            INDEX_TIMESTAMP_FIELD.to_owned(),
            serde_json::Value::String(record.timestamp.clone()),
        );
    }
    Ok(doc)
}

/// 레코드를 한 줄에 하나씩 NDJSON으로 씁니다.
///
/// 쓴 문서 수를 반환합니다.
pub fn write_ndjson<'a, I, W>(records: I, writer: &mut W) -> Result<usize, LogPipelineError>
where
    I: IntoIterator<Item = &'a LogRecord>,
    W: Write + ?Sized,
{
    let mut written = 0;
    for record in records {
        let doc = to_document(record)?;
        serde_json::to_writer(&mut *writer, &doc)?;
        writer.write_all(b"\n")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geolog_core::types::AlertLabel;

    fn sample() -> LogRecord {
        let mut record = LogRecord::new(
            "2024-01-15T12:00:00.123Z",
            "info",
            "GeocodingAPI",
            "Geocoding successful",
        );
        record.line_number = 1;
        record.service = "gis-geocoding-api".to_owned();
        record
    }

    #[test]
    fn document_mirrors_timestamp() {
        let doc = to_document(&sample()).unwrap();
        assert_eq!(doc["@timestamp"], "2024-01-15T12:00:00.123Z");
        assert_eq!(doc["timestamp"], "2024-01-15T12:00:00.123Z");
        assert_eq!(doc["service"], "gis-geocoding-api");
        assert_eq!(doc["line_number"], 1);
    }

    #[test]
    fn document_flattens_attributes() {
        let mut record = sample();
        record
            .attributes
            .insert("thread".to_owned(), serde_json::json!("worker-1"));
        record.alert = Some(AlertLabel::SlowResponse);
        let doc = to_document(&record).unwrap();
        assert_eq!(doc["thread"], "worker-1");
        assert_eq!(doc["alert"], "slow_response");
    }

    #[test]
    fn colliding_attribute_does_not_replace_named_field() {
        let mut record = sample();
        record
            .attributes
            .insert("message".to_owned(), serde_json::json!("other"));
        record
            .attributes
            .insert("operation_type".to_owned(), serde_json::json!("batch"));

        let doc = to_document(&record).unwrap();
        assert_eq!(doc["message"], "Geocoding successful");
        assert_eq!(doc["operation_type"], "batch");
    }

    #[test]
    fn ndjson_one_document_per_line() {
        let mut second = sample();
        second.line_number = 2;
        let records = vec![sample(), second];

        let mut out = Vec::new();
        let written = write_ndjson(&records, &mut out).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let doc: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(doc["line_number"], 2);
    }

    #[test]
    fn ndjson_empty_input_writes_nothing() {
        let mut out = Vec::new();
        assert_eq!(write_ndjson(std::iter::empty(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
