//! 로그 파이프라인 설정
//!
//! [`PipelineConfig`]는 core의 [`EnrichmentConfig`](geolog_core::config::EnrichmentConfig)를
//! 기반으로 규칙 엔진과 디코더에 전달되는 명시적 설정 구조체입니다.
//! 서비스 메타데이터는 전역 상수가 아니라 이 구조체를 통해서만 전달됩니다.
//!
//! # 사용 예시
//! ```ignore
//! use geolog_core::config::GeologConfig;
//! use geolog_log_pipeline::config::PipelineConfig;
//!
//! let core_config = GeologConfig::default();
//! let config = PipelineConfig::from_core(&core_config.enrichment);
//! ```

use serde::{Deserialize, Serialize};

use geolog_core::config::{
    DEFAULT_ENVIRONMENT, DEFAULT_GEOCODE_TIME_THRESHOLD_MS, DEFAULT_MAX_LINE_BYTES,
    DEFAULT_RESPONSE_TIME_THRESHOLD_MS, DEFAULT_SERVICE_NAME, DEFAULT_VERSION, EnrichmentConfig,
};

use crate::error::LogPipelineError;

/// 로그 파이프라인 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// 레코드에 찍히는 서비스 이름
    pub service_name: String,
    /// 레코드에 찍히는 배포 환경
    pub environment: String,
    /// 레코드에 찍히는 서비스 버전
    pub version: String,
    /// 응답 시간 알림 임계값 (밀리초, 초과 시 알림)
    pub response_time_threshold_ms: f64,
    /// 지오코딩 시간 알림 임계값 (밀리초, 초과 시 알림)
    pub geocode_time_threshold_ms: f64,
    /// 구조화 디코딩을 시도할 최대 라인 크기 (바이트)
    pub max_line_bytes: usize,
}

impl Default for PipelineConfig {
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

impl PipelineConfig {
    /// core의 `EnrichmentConfig`에서 파이프라인 설정을 생성합니다.
    pub fn from_core(core: &EnrichmentConfig) -> Self {
        Self {
            service_name: core.service_name.clone(),
            environment: core.environment.clone(),
            version: core.version.clone(),
            response_time_threshold_ms: core.response_time_threshold_ms,
            geocode_time_threshold_ms: core.geocode_time_threshold_ms,
            max_line_bytes: core.max_line_bytes,
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogPipelineError> {
        if self.service_name.trim().is_empty() {
            return Err(LogPipelineError::Config {
                field: "service_name".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        Self::validate_threshold("response_time_threshold_ms", self.response_time_threshold_ms)?;
        Self::validate_threshold("geocode_time_threshold_ms", self.geocode_time_threshold_ms)?;

        if self.max_line_bytes == 0 {
            return Err(LogPipelineError::Config {
                field: "max_line_bytes".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        Ok(())
    }

    fn validate_threshold(field: &str, value: f64) -> Result<(), LogPipelineError> {
        if !value.is_finite() || value < 0.0 {
            return Err(LogPipelineError::Config {
                field: field.to_owned(),
                reason: format!("must be a finite number >= 0, got {}", value),
            });
        }
        Ok(())
    }
}

/// 파이프라인 설정 빌더
///
/// 3개 이상의 설정 필드가 있으므로 빌더 패턴을 사용합니다.
#[derive(Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 서비스 이름을 설정합니다.
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.config.service_name = name.into();
        self
    }

    /// 배포 환경을 설정합니다.
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.config.environment = environment.into();
        self
    }

    /// 서비스 버전을 설정합니다.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// 응답 시간 임계값(밀리초)을 설정합니다.
    pub fn response_time_threshold_ms(mut self, threshold: f64) -> Self {
        self.config.response_time_threshold_ms = threshold;
        self
    }

    /// 지오코딩 시간 임계값(밀리초)을 설정합니다.
    pub fn geocode_time_threshold_ms(mut self, threshold: f64) -> Self {
        self.config.geocode_time_threshold_ms = threshold;
        self
    }

    /// 최대 라인 크기(바이트)를 설정합니다.
    pub fn max_line_bytes(mut self, bytes: usize) -> Self {
        self.config.max_line_bytes = bytes;
        self
    }

    /// 설정을 검증하고 `PipelineConfig`를 생성합니다.
    pub fn build(self) -> Result<PipelineConfig, LogPipelineError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
