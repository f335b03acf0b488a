//! 보강 규칙 엔진 -- 고정 순서의 순수 변환 단계 목록
//!
//! 각 규칙은 레코드 값을 받아 보강된 레코드 값을 돌려주는
//! [`EnrichmentRule`] 구현체입니다. 엔진은 규칙 목록을 순서대로 적용할 뿐
//! 규칙 사이에 공유되는 상태는 없습니다.
//!
//! # 기본 규칙 순서
//! 1. [`StampMetadata`]: 서비스 이름, 환경, 버전 기록
//! 2. [`ThresholdRule::response_time`]: 응답 시간 초과 시 `slow_response`
//! 3. [`ThresholdRule::geocode_time`]: 지오코딩 시간 초과 시 `slow_geocoding`
//! 4. [`OperationClassifier`]: `GeocodingAPI` 레코드의 작업 유형 분류
//!
//! `tags`가 누적되고 `alert`가 덮어써지므로 순서가 결과를 결정합니다.

pub mod classify;
pub mod metadata;
pub mod threshold;

pub use classify::{GEOCODING_LOGGER, OperationClassifier};
pub use metadata::StampMetadata;
pub use threshold::{GEOCODE_TIME_KEY, RESPONSE_TIME_KEY, ThresholdRule};

use geolog_core::pipeline::EnrichmentRule;
use geolog_core::types::LogRecord;

use crate::config::PipelineConfig;

/// 보강 규칙 엔진
///
/// # 사용 예시
/// ```ignore
/// let engine = RuleEngine::from_config(&PipelineConfig::default());
/// let enriched = engine.apply(record);
/// ```
pub struct RuleEngine {
    /// 적용 순서대로 정렬된 규칙 목록
    rules: Vec<Box<dyn EnrichmentRule>>,
}

impl RuleEngine {
    /// 규칙이 없는 엔진을 생성합니다.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// 설정으로 기본 규칙 목록을 구성합니다.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new()
            .with_rule(Box::new(StampMetadata::from_config(config)))
            .with_rule(Box::new(ThresholdRule::response_time(
                config.response_time_threshold_ms,
            )))
            .with_rule(Box::new(ThresholdRule::geocode_time(
                config.geocode_time_threshold_ms,
            )))
            .with_rule(Box::new(OperationClassifier))
    }

    /// 규칙을 목록 끝에 추가합니다.
    pub fn with_rule(mut self, rule: Box<dyn EnrichmentRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// 모든 규칙을 순서대로 적용합니다.
    pub fn apply(&self, record: LogRecord) -> LogRecord {
        self.rules
            .iter()
            .fold(record, |record, rule| rule.apply(record))
    }

    /// 규칙 이름을 적용 순서대로 반환합니다.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// 등록된 규칙 수를 반환합니다.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}
