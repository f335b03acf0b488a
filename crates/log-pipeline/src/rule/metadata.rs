//! 서비스 메타데이터 스탬프 규칙

use geolog_core::pipeline::EnrichmentRule;
use geolog_core::types::LogRecord;

use crate::config::PipelineConfig;

/// 설정의 서비스 이름, 환경, 버전을 레코드에 기록합니다.
#[derive(Debug, Clone)]
pub struct StampMetadata {
    service: String,
    environment: String,
    version: String,
}

impl StampMetadata {
    /// 새 스탬프 규칙을 생성합니다.
    pub fn new(
        service: impl Into<String>,
        environment: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            environment: environment.into(),
            version: version.into(),
        }
    }

    /// 파이프라인 설정에서 생성합니다.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(&config.service_name, &config.environment, &config.version)
    }
}

impl EnrichmentRule for StampMetadata {
    fn name(&self) -> &str {
        "stamp_metadata"
    }

    fn apply(&self, mut record: LogRecord) -> LogRecord {
        record.service.clone_from(&self.service);
        record.environment.clone_from(&self.environment);
        record.version.clone_from(&self.version);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_configured_values() {
        let rule = StampMetadata::new("gis-geocoding-api", "staging", "1.4.2");
        let record = rule.apply(LogRecord::new("t", "info", "raw", "m"));
        assert_eq!(record.service, "gis-geocoding-api");
        assert_eq!(record.environment, "staging");
        assert_eq!(record.version, "1.4.2");
    }

    #[test]
    fn from_default_config() {
        let rule = StampMetadata::from_config(&PipelineConfig::default());
        let record = rule.apply(LogRecord::new("t", "info", "raw", "m"));
        assert_eq!(record.service, "gis-geocoding-api");
        assert_eq!(record.environment, "development");
        assert_eq!(record.version, "1.0.0");
    }
}
