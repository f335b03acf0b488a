//! 조회/집계 계층 -- 저장소 스냅샷에 대한 읽기 전용 뷰
//!
//! 모든 뷰는 현재 레코드 집합의 순수 함수이며 저장소를 변경하지 않습니다.
//! 수집이 끝난 뒤에만 호출된다고 가정합니다.
//!
//! - [`QueryView::search`]: 텍스트/레벨/로거 필터 검색
//! - [`QueryView::performance_summary`]: 성능 대시보드
//! - [`QueryView::error_summary`]: 에러/경고 대시보드
//! - [`QueryView::dashboard`]: 위 세 가지를 묶은 보고서

use serde::{Deserialize, Serialize};

use geolog_core::types::{AlertLabel, LogRecord, OperationType};

use crate::rule::{GEOCODE_TIME_KEY, GEOCODING_LOGGER, RESPONSE_TIME_KEY};
use crate::store::RecordStore;

/// 요약에 포함할 레벨별 최대 메시지 수
pub const MAX_SUMMARY_MESSAGES: usize = 5;

/// 성능 지표가 없을 때의 안내 메시지
pub const NO_PERFORMANCE_METRICS: &str = "No performance metrics found";

const SUCCESSFUL_GEOCODE_PHRASE: &str = "Geocoding successful";
const FAILED_PHRASE: &str = "failed";
const ERROR_LEVEL: &str = "error";
const WARN_LEVEL: &str = "warn";

/// 필터 검색 조건
///
/// 빈 문자열은 조건이 없는 것으로 취급합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// 메시지 부분 문자열 (대소문자 무시)
    pub text: Option<String>,
    /// 정확히 일치해야 하는 레벨
    pub level: Option<String>,
    /// 정확히 일치해야 하는 로거
    pub logger: Option<String>,
}

impl SearchQuery {
    /// 조건이 없는 검색을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 메시지 텍스트 조건을 설정합니다.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = non_empty(text.into());
        self
    }

    /// 레벨 조건을 설정합니다.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = non_empty(level.into());
        self
    }

    /// 로거 조건을 설정합니다.
    pub fn logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = non_empty(logger.into());
        self
    }

    /// 레코드가 모든 조건을 만족하는지 확인합니다.
    pub fn matches(&self, record: &LogRecord) -> bool {
        let text_ok = match self.text.as_deref().filter(|t| !t.is_empty()) {
            Some(text) => record
                .message
                .to_lowercase()
                .contains(&text.to_lowercase()),
            None => true,
        };
        let level_ok = match self.level.as_deref().filter(|l| !l.is_empty()) {
            Some(level) => record.level == level,
            None => true,
        };
        let logger_ok = match self.logger.as_deref().filter(|l| !l.is_empty()) {
            Some(logger) => record.logger == logger,
            None => true,
        };
        text_ok && level_ok && logger_ok
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// 성능 대시보드 수치
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// `http_request`로 분류된 레코드 수
    pub total_requests: usize,
    /// 응답 시간을 가진 레코드의 평균 응답 시간 (없으면 0)
    pub avg_response_time_ms: f64,
    /// 지오코딩 시간을 가진 레코드의 평균 지오코딩 시간 (없으면 0)
    pub avg_geocode_time_ms: f64,
    /// 알림 레이블이 붙은 레코드 수
    pub slow_requests: usize,
    /// "Geocoding successful"을 포함하는 메시지 수
    pub successful_geocodes: usize,
    /// "failed"를 포함하는 메시지 수 (대소문자 무시)
    pub failed_geocodes: usize,
}

/// 성능 요약
///
/// 성능 지표를 가진 레코드가 하나도 없으면 안내 메시지만 담습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerformanceSummary {
    /// 집계 결과
    Metrics(PerformanceMetrics),
    /// 성능 지표 없음
    Empty {
        /// 안내 메시지
        message: String,
    },
}

impl PerformanceSummary {
    /// 성능 지표 없음 결과를 생성합니다.
    pub fn empty() -> Self {
        Self::Empty {
            message: NO_PERFORMANCE_METRICS.to_owned(),
        }
    }

    /// 지표 없음 결과인지 확인합니다.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// 집계 결과를 반환합니다.
    pub fn metrics(&self) -> Option<&PerformanceMetrics> {
        match self {
            Self::Metrics(m) => Some(m),
            Self::Empty { .. } => None,
        }
    }
}

/// 에러/경고 요약
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSummary {
    /// `error` 레벨 레코드 수
    pub total_errors: usize,
    /// `warn` 레벨 레코드 수
    pub total_warnings: usize,
    /// 저장소 순서의 처음 5개 에러 메시지
    pub error_messages: Vec<String>,
    /// 저장소 순서의 처음 5개 경고 메시지
    pub warning_messages: Vec<String>,
}

/// 대시보드 예시 검색 결과 수
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCounts {
    /// 메시지에 "geocoding"이 포함된 레코드 수
    pub geocoding_operations: usize,
    /// `error` 레벨 레코드 수
    pub error_logs: usize,
    /// `GeocodingAPI` 로거 레코드 수
    pub geocoding_api_logs: usize,
}

/// 대시보드 보고서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// 처리된 레코드 수
    pub processed: usize,
    /// 성능 요약
    pub performance: PerformanceSummary,
    /// 에러 요약
    pub errors: ErrorSummary,
    /// 예시 검색 결과 수
    pub searches: SearchCounts,
}

/// 저장소에 대한 읽기 전용 조회 뷰
#[derive(Debug, Clone, Copy)]
pub struct QueryView<'a> {
    records: &'a [LogRecord],
}

impl<'a> QueryView<'a> {
    /// 저장소 스냅샷으로 뷰를 생성합니다.
    pub fn new(store: &'a RecordStore) -> Self {
        Self::from_records(store.records())
    }

    /// 레코드 슬라이스로 뷰를 생성합니다.
    pub fn from_records(records: &'a [LogRecord]) -> Self {
        Self { records }
    }

    /// 조건을 모두 만족하는 레코드를 저장소 순서대로 반환합니다.
    pub fn search(&self, query: &SearchQuery) -> Vec<&'a LogRecord> {
        self.records.iter().filter(|r| query.matches(r)).collect()
    }

    /// 조건을 만족하는 레코드 수를 반환합니다.
    pub fn count(&self, query: &SearchQuery) -> usize {
        self.records.iter().filter(|r| query.matches(r)).count()
    }

    /// 성능 요약을 계산합니다.
    pub fn performance_summary(&self) -> PerformanceSummary {
        if self.records.iter().all(|r| r.performance.is_empty()) {
            return PerformanceSummary::empty();
        }

        PerformanceSummary::Metrics(PerformanceMetrics {
            total_requests: self
                .records
                .iter()
                .filter(|r| r.operation_type == Some(OperationType::HttpRequest))
                .count(),
            avg_response_time_ms: self.mean_of(RESPONSE_TIME_KEY),
            avg_geocode_time_ms: self.mean_of(GEOCODE_TIME_KEY),
            slow_requests: self
                .records
                .iter()
                .filter(|r| r.alert.is_some_and(|a| AlertLabel::ALL.contains(&a)))
                .count(),
            successful_geocodes: self
                .records
                .iter()
                .filter(|r| r.message.contains(SUCCESSFUL_GEOCODE_PHRASE))
                .count(),
            failed_geocodes: self
                .records
                .iter()
                .filter(|r| r.message.to_lowercase().contains(FAILED_PHRASE))
                .count(),
        })
    }

    /// 해당 지표를 가진 레코드만으로 평균을 구합니다. 없으면 0입니다.
    fn mean_of(&self, key: &str) -> f64 {
        let (sum, count) = self
            .records
            .iter()
            .filter_map(|r| r.metric(key))
            .fold((0.0_f64, 0_u32), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            0.0
        } else {
            sum / f64::from(count)
        }
    }

    /// 에러/경고 요약을 계산합니다.
    pub fn error_summary(&self) -> ErrorSummary {
        let by_level = |level: &str| -> (usize, Vec<String>) {
            let mut matching = self.records.iter().filter(|r| r.level == level);
            let messages: Vec<String> = matching
                .by_ref()
                .take(MAX_SUMMARY_MESSAGES)
                .map(|r| r.message.clone())
                .collect();
            (messages.len() + matching.count(), messages)
        };

        let (total_errors, error_messages) = by_level(ERROR_LEVEL);
        let (total_warnings, warning_messages) = by_level(WARN_LEVEL);

        ErrorSummary {
            total_errors,
            total_warnings,
            error_messages,
            warning_messages,
        }
    }

    /// 대시보드 보고서를 생성합니다.
    pub fn dashboard(&self) -> DashboardReport {
        DashboardReport {
            processed: self.records.len(),
            performance: self.performance_summary(),
            errors: self.error_summary(),
            searches: SearchCounts {
                geocoding_operations: self.count(&SearchQuery::new().text("geocoding")),
                error_logs: self.count(&SearchQuery::new().level(ERROR_LEVEL)),
                geocoding_api_logs: self.count(&SearchQuery::new().logger(GEOCODING_LOGGER)),
            },
        }
    }
}
