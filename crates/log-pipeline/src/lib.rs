#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`collector`]: 로그 파일 또는 메모리 소스에서 원시 라인 공급
//! - [`parser`]: JSON 디코더와 대체(raw) 레코드 복구 라우터
//! - [`extract`]: 메시지의 `key:value` 메타데이터 추출
//! - [`rule`]: 고정 순서 보강 규칙 엔진
//! - [`store`]: 추가 전용 레코드 저장소
//! - [`query`]: 검색, 성능/에러 요약, 대시보드 보고서
//! - [`export`]: 색인용 문서 및 NDJSON 내보내기
//! - [`pipeline`]: 전체 흐름 오케스트레이션
//! - [`config`]: 파이프라인 설정 (core 설정 기반)
//! - [`error`]: 도메인 에러 타입

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod pipeline;
pub mod query;
pub mod store;

pub mod collector;
pub mod parser;
pub mod rule;

// --- 주요 타입 re-export ---

// 파이프라인
pub use pipeline::{LogPipeline, LogPipelineBuilder, RunStats};

// 설정
pub use config::{PipelineConfig, PipelineConfigBuilder};

// 에러
pub use error::LogPipelineError;

// 수집기
pub use collector::{LineReader, RawLine};

// 디코더
pub use parser::{DecodeOutcome, JsonRecordDecoder, ParserRouter};

// 추출기
pub use extract::ExtractedFields;

// 규칙 엔진
pub use rule::{OperationClassifier, RuleEngine, StampMetadata, ThresholdRule};

// 저장소와 조회
pub use query::{
    DashboardReport, ErrorSummary, PerformanceMetrics, PerformanceSummary, QueryView,
    SearchCounts, SearchQuery,
};
pub use store::RecordStore;
