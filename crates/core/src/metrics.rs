//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 파이프라인은 이 상수를 사용하여 `metrics::counter!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `geolog_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(geolog_core::metrics::PIPELINE_LINES_READ_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 알림 레이블 키 (slow_response, slow_geocoding)
pub const LABEL_ALERT: &str = "alert";

// ─── Pipeline 메트릭 ───────────────────────────────────────────────

/// 읽은 원시 라인 수 (counter)
pub const PIPELINE_LINES_READ_TOTAL: &str = "geolog_pipeline_lines_read_total";

/// 저장소에 적재된 레코드 수 (counter)
pub const PIPELINE_RECORDS_STORED_TOTAL: &str = "geolog_pipeline_records_stored_total";

/// 구조화 디코딩에 실패해 대체 레코드로 복구된 라인 수 (counter)
pub const PIPELINE_DECODE_FALLBACKS_TOTAL: &str = "geolog_pipeline_decode_fallbacks_total";

/// 숫자 파싱에 실패해 context로 강등된 성능 토큰 수 (counter)
pub const PIPELINE_METRIC_DEMOTIONS_TOTAL: &str = "geolog_pipeline_metric_demotions_total";

/// 발생한 성능 알림 수 (counter, label: alert)
pub const PIPELINE_ALERTS_TOTAL: &str = "geolog_pipeline_alerts_total";

/// 한 번의 실행 처리 시간 (histogram, 초)
pub const PIPELINE_RUN_DURATION_SECONDS: &str = "geolog_pipeline_run_duration_seconds";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// CLI가 시작할 때 호출합니다. 전역 레코더가 없으면 아무 일도 하지 않으며,
/// 여러 번 호출해도 안전합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        PIPELINE_LINES_READ_TOTAL,
        "Total number of non-blank raw lines read from the line source"
    );
    describe_counter!(
        PIPELINE_RECORDS_STORED_TOTAL,
        "Total number of enriched records appended to the record store"
    );
    describe_counter!(
        PIPELINE_DECODE_FALLBACKS_TOTAL,
        "Total number of lines that failed structured decoding and became raw records"
    );
    describe_counter!(
        PIPELINE_METRIC_DEMOTIONS_TOTAL,
        "Total number of performance tokens demoted to context because the value was not numeric"
    );
    describe_counter!(
        PIPELINE_ALERTS_TOTAL,
        "Total number of performance alerts raised, by alert label"
    );
    describe_histogram!(
        PIPELINE_RUN_DURATION_SECONDS,
        "Time to process one full line source in seconds"
    );
}
