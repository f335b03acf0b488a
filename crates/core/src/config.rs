//! 설정 관리 — geolog.toml 파싱 및 런타임 설정
//!
//! [`GeologConfig`]는 모든 섹션의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`GEOLOG_ENRICHMENT_SERVICE_NAME=geo-api` 형식)
//! 3. 설정 파일 (`geolog.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), geolog_core::error::GeologError> {
//! use geolog_core::config::GeologConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = GeologConfig::load("geolog.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = GeologConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, GeologError};

/// 기본 서비스 이름
pub const DEFAULT_SERVICE_NAME: &str = "gis-geocoding-api";
/// 기본 배포 환경
pub const DEFAULT_ENVIRONMENT: &str = "development";
/// 기본 서비스 버전
pub const DEFAULT_VERSION: &str = "1.0.0";
/// 기본 응답 시간 임계값 (밀리초)
pub const DEFAULT_RESPONSE_TIME_THRESHOLD_MS: f64 = 1000.0;
/// 기본 지오코딩 시간 임계값 (밀리초)
pub const DEFAULT_GEOCODE_TIME_THRESHOLD_MS: f64 = 500.0;
/// 구조화 디코딩을 시도할 최대 라인 크기 (바이트)
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// geolog 통합 설정
///
/// `geolog.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeologConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 보강 규칙 설정
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

impl GeologConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, GeologError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, GeologError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GeologError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                GeologError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 파일 없이 기본값에 환경변수 오버라이드만 적용한 설정을 만듭니다.
    pub fn from_env() -> Result<Self, GeologError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, GeologError> {
        toml::from_str(toml_str).map_err(|e| {
            GeologError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `GEOLOG_{SECTION}_{FIELD}`
    /// 예: `GEOLOG_ENRICHMENT_ENVIRONMENT=production`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "GEOLOG_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "GEOLOG_GENERAL_LOG_FORMAT");

        // Enrichment
        override_string(
            &mut self.enrichment.service_name,
            "GEOLOG_ENRICHMENT_SERVICE_NAME",
        );
        override_string(
            &mut self.enrichment.environment,
            "GEOLOG_ENRICHMENT_ENVIRONMENT",
        );
        override_string(&mut self.enrichment.version, "GEOLOG_ENRICHMENT_VERSION");
        override_f64(
            &mut self.enrichment.response_time_threshold_ms,
            "GEOLOG_ENRICHMENT_RESPONSE_TIME_THRESHOLD_MS",
        );
        override_f64(
            &mut self.enrichment.geocode_time_threshold_ms,
            "GEOLOG_ENRICHMENT_GEOCODE_TIME_THRESHOLD_MS",
        );
        override_usize(
            &mut self.enrichment.max_line_bytes,
            "GEOLOG_ENRICHMENT_MAX_LINE_BYTES",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), GeologError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        self.enrichment.validate()
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 보강 규칙 설정
///
/// 모든 레코드에 찍히는 서비스 메타데이터와 성능 알림 임계값입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// 서비스 이름
    pub service_name: String,
    /// 배포 환경
    pub environment: String,
    /// 서비스 버전
    pub version: String,
    /// `response_time_ms`가 이 값을 초과하면 `slow_response`
    pub response_time_threshold_ms: f64,
    /// `geocode_time_ms`가 이 값을 초과하면 `slow_geocoding`
    pub geocode_time_threshold_ms: f64,
    /// 구조화 디코딩을 시도할 최대 라인 크기 (바이트)
    pub max_line_bytes: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_owned(),
            environment: DEFAULT_ENVIRONMENT.to_owned(),
            version: DEFAULT_VERSION.to_owned(),
            response_time_threshold_ms: DEFAULT_RESPONSE_TIME_THRESHOLD_MS,
            geocode_time_threshold_ms: DEFAULT_GEOCODE_TIME_THRESHOLD_MS,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl EnrichmentConfig {
    /// 보강 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), GeologError> {
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "enrichment.service_name".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        let thresholds = [
            (
                "enrichment.response_time_threshold_ms",
                self.response_time_threshold_ms,
            ),
            (
                "enrichment.geocode_time_threshold_ms",
                self.geocode_time_threshold_ms,
            ),
        ];
        for (field, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_owned(),
                    reason: format!("must be a finite number >= 0, got {}", value),
                }
                .into());
            }
        }

        if self.max_line_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "enrichment.max_line_bytes".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_f64(target: &mut f64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.trim().parse::<f64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse f64 from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = GeologConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "json");
        assert_eq!(config.enrichment.service_name, "gis-geocoding-api");
        assert_eq!(config.enrichment.environment, "development");
        assert_eq!(config.enrichment.version, "1.0.0");
        assert_eq!(config.enrichment.response_time_threshold_ms, 1000.0);
        assert_eq!(config.enrichment.geocode_time_threshold_ms, 500.0);
    }

    #[test]
    fn default_config_passes_validation() {
        GeologConfig::default().validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = GeologConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.enrichment.version, "1.0.0");
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[enrichment]
environment = "staging"
geocode_time_threshold_ms = 250
"#;
        let config = GeologConfig::parse(toml).unwrap();
        assert_eq!(config.enrichment.environment, "staging");
        assert_eq!(config.enrichment.geocode_time_threshold_ms, 250.0);
        // 나머지는 기본값 유지
        assert_eq!(config.enrichment.service_name, "gis-geocoding-api");
        assert_eq!(config.enrichment.response_time_threshold_ms, 1000.0);
        assert_eq!(config.general.log_format, "json");
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let err = GeologConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            GeologError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = GeologConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = GeologConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_empty_service_name() {
        let mut config = GeologConfig::default();
        config.enrichment.service_name = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("service_name"));
    }

    #[test]
    fn validate_rejects_negative_threshold() {
        let mut config = GeologConfig::default();
        config.enrichment.response_time_threshold_ms = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("response_time_threshold_ms"));
    }

    #[test]
    fn validate_rejects_nan_threshold() {
        let mut config = GeologConfig::default();
        config.enrichment.geocode_time_threshold_ms = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("geocode_time_threshold_ms"));
    }

    #[test]
    fn validate_rejects_zero_max_line_bytes() {
        let mut config = GeologConfig::default();
        config.enrichment.max_line_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: 고유한 키를 사용하므로 다른 테스트와 충돌하지 않습니다.
        unsafe { std::env::set_var("TEST_GEOLOG_STR", "overridden") };
        override_string(&mut val, "TEST_GEOLOG_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_GEOLOG_STR") };
    }

    #[test]
    fn env_override_f64_valid() {
        let mut val = 1000.0;
        // SAFETY: 고유한 키를 사용하므로 다른 테스트와 충돌하지 않습니다.
        unsafe { std::env::set_var("TEST_GEOLOG_F64", " 1500.5 ") };
        override_f64(&mut val, "TEST_GEOLOG_F64");
        assert_eq!(val, 1500.5);
        unsafe { std::env::remove_var("TEST_GEOLOG_F64") };
    }

    #[test]
    fn env_override_f64_invalid_keeps_original() {
        let mut val = 500.0;
        // SAFETY: 고유한 키를 사용하므로 다른 테스트와 충돌하지 않습니다.
        unsafe { std::env::set_var("TEST_GEOLOG_F64_BAD", "fast") };
        override_f64(&mut val, "TEST_GEOLOG_F64_BAD");
        assert_eq!(val, 500.0); // 원래 값 유지
        unsafe { std::env::remove_var("TEST_GEOLOG_F64_BAD") };
    }

    #[test]
    fn env_override_usize_invalid_keeps_original() {
        let mut val = 42usize;
        // SAFETY: 고유한 키를 사용하므로 다른 테스트와 충돌하지 않습니다.
        unsafe { std::env::set_var("TEST_GEOLOG_USIZE_BAD", "-3") };
        override_usize(&mut val, "TEST_GEOLOG_USIZE_BAD");
        assert_eq!(val, 42);
        unsafe { std::env::remove_var("TEST_GEOLOG_USIZE_BAD") };
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_GEOLOG_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = GeologConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = GeologConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(
            config.enrichment.geocode_time_threshold_ms,
            parsed.enrichment.geocode_time_threshold_ms
        );
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = GeologConfig::from_file("/nonexistent/path/geolog.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GeologError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
