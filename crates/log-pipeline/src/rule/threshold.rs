//! 성능 임계값 알림 규칙
//!
//! 지표 값이 임계값을 **초과**하면 알림 레이블을 설정하고
//! `performance_alert` 태그를 추가합니다. 나중에 적용된 규칙의 레이블이
//! 앞선 레이블을 덮어쓰며, 태그는 중복을 제거하지 않습니다.

use geolog_core::metrics as m;
use geolog_core::pipeline::EnrichmentRule;
use geolog_core::types::{AlertLabel, LogRecord, PERFORMANCE_ALERT_TAG};

/// 응답 시간 지표 키
pub const RESPONSE_TIME_KEY: &str = "response_time_ms";

/// 지오코딩 시간 지표 키
pub const GEOCODE_TIME_KEY: &str = "geocode_time_ms";

/// 지표 하나에 대한 임계값 규칙
#[derive(Debug, Clone)]
pub struct ThresholdRule {
    name: String,
    metric_key: String,
    threshold: f64,
    label: AlertLabel,
}

impl ThresholdRule {
    /// 새 임계값 규칙을 생성합니다.
    pub fn new(
        name: impl Into<String>,
        metric_key: impl Into<String>,
        threshold: f64,
        label: AlertLabel,
    ) -> Self {
        Self {
            name: name.into(),
            metric_key: metric_key.into(),
            threshold,
            label,
        }
    }

    /// 응답 시간 규칙 (`slow_response`)
    pub fn response_time(threshold_ms: f64) -> Self {
        Self::new(
            "slow_response",
            RESPONSE_TIME_KEY,
            threshold_ms,
            AlertLabel::SlowResponse,
        )
    }

    /// 지오코딩 시간 규칙 (`slow_geocoding`)
    pub fn geocode_time(threshold_ms: f64) -> Self {
        Self::new(
            "slow_geocoding",
            GEOCODE_TIME_KEY,
            threshold_ms,
            AlertLabel::SlowGeocoding,
        )
    }

    /// 임계값을 반환합니다.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl EnrichmentRule for ThresholdRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut record: LogRecord) -> LogRecord {
        let Some(value) = record.metric(&self.metric_key) else {
            return record;
        };

        if value > self.threshold {
            record.set_alert(self.label);
            record.tags.push(PERFORMANCE_ALERT_TAG.to_owned());
            metrics::counter!(m::PIPELINE_ALERTS_TOTAL, m::LABEL_ALERT => self.label.as_str())
                .increment(1);
        }
        record
    }
}
