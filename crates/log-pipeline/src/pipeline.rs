//! 파이프라인 오케스트레이션 -- 수집/디코딩/추출/보강/적재의 전체 흐름
//!
//! [`LogPipeline`]은 라인 소스 하나를 끝까지 처리하여 새 [`RecordStore`]를
//! 만듭니다. 한 라인씩 입력 순서대로 처리하는 단일 스레드 배치 처리이며,
//! 조회는 실행이 끝난 뒤 반환된 저장소에 대해서만 수행합니다.
//!
//! # 내부 흐름
//! ```text
//! LineReader -> ParserRouter -> extract (구조화 레코드만) -> RuleEngine -> line_number -> RecordStore
//! ```
//!
//! 디코딩 실패와 숫자 파싱 실패는 라인 안에서 복구되므로, 실행이 실패하는
//! 경우는 입력 소스를 열 수 없을 때뿐입니다.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use geolog_core::metrics as m;
use geolog_core::types::LogRecord;

use crate::collector::LineReader;
use crate::config::PipelineConfig;
use crate::error::LogPipelineError;
use crate::extract;
use crate::parser::{DecodeOutcome, ParserRouter};
use crate::rule::RuleEngine;
use crate::store::RecordStore;

/// 한 번의 실행 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// 읽은 (공백이 아닌) 라인 수
    pub lines_read: u64,
    /// 저장소에 적재된 레코드 수
    pub records_stored: u64,
    /// 대체 레코드로 복구된 라인 수
    pub fallback_records: u64,
    /// 알림 레이블이 붙은 레코드 수
    pub alerts_raised: u64,
}

/// 로그 파이프라인
///
/// # 사용 예시
/// ```ignore
/// use geolog_log_pipeline::{LineReader, LogPipelineBuilder};
///
/// let pipeline = LogPipelineBuilder::new().config(config).build()?;
/// let reader = LineReader::open("/var/log/gis-server.log").await?;
/// let (store, stats) = pipeline.run(reader)?;
/// ```
pub struct LogPipeline {
    /// 파이프라인 설정
    config: PipelineConfig,
    /// 디코더 라우터
    parser: ParserRouter,
    /// 보강 규칙 엔진
    rule_engine: RuleEngine,
}

impl LogPipeline {
    /// 파이프라인 설정을 반환합니다.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 규칙 엔진에 대한 참조를 반환합니다.
    pub fn rule_engine(&self) -> &RuleEngine {
        &self.rule_engine
    }

    /// 라인 하나를 보강된 레코드로 변환합니다.
    ///
    /// 반환값의 두 번째 요소는 대체 레코드 여부입니다.
    pub fn process_line(&self, line: &str, line_number: u64) -> (LogRecord, bool) {
        let outcome = self.parser.decode_or_fallback(line);
        let fallback = outcome.is_fallback();

        let record = match outcome {
            DecodeOutcome::Structured(record) => extract::apply(record),
            DecodeOutcome::Fallback(record) => record,
        };

        let mut record = self.rule_engine.apply(record);
        record.line_number = line_number;
        (record, fallback)
    }

    /// 라인 소스를 끝까지 처리합니다.
    pub fn run(&self, reader: LineReader) -> Result<(RecordStore, RunStats), LogPipelineError> {
        let started = Instant::now();
        let source = reader.source().to_owned();
        tracing::info!(source = %source, "starting pipeline run");

        let mut store = RecordStore::new();
        let mut stats = RunStats::default();

        for raw in reader {
            stats.lines_read += 1;
            metrics::counter!(m::PIPELINE_LINES_READ_TOTAL).increment(1);

            let (record, fallback) = self.process_line(&raw.text, stats.lines_read);
            if fallback {
                stats.fallback_records += 1;
                metrics::counter!(m::PIPELINE_DECODE_FALLBACKS_TOTAL).increment(1);
                tracing::debug!(line = stats.lines_read, "line stored as raw record");
            }
            if record.alert.is_some() {
                stats.alerts_raised += 1;
            }

            store.append(record)?;
            stats.records_stored += 1;
            metrics::counter!(m::PIPELINE_RECORDS_STORED_TOTAL).increment(1);
        }

        metrics::histogram!(m::PIPELINE_RUN_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());
        tracing::info!(
            source = %source,
            lines = stats.lines_read,
            records = stats.records_stored,
            fallbacks = stats.fallback_records,
            alerts = stats.alerts_raised,
            "pipeline run finished"
        );

        Ok((store, stats))
    }

    /// 메모리 내 라인 목록을 처리합니다.
    pub fn ingest_lines<I, S>(&self, lines: I) -> Result<(RecordStore, RunStats), LogPipelineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(LineReader::from_lines("memory", lines))
    }

    /// 로그 파일을 열어 처리합니다.
    ///
    /// 파일이 없으면 저장소 없이 `Collector` 에러를 반환합니다.
    pub async fn run_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(RecordStore, RunStats), LogPipelineError> {
        let reader = LineReader::open(path).await?;
        self.run(reader)
    }
}

/// 로그 파이프라인 빌더
pub struct LogPipelineBuilder {
    config: PipelineConfig,
    parser: Option<ParserRouter>,
    rule_engine: Option<RuleEngine>,
}

impl LogPipelineBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            parser: None,
            rule_engine: None,
        }
    }

    /// 파이프라인 설정을 지정합니다.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// 디코더 라우터를 교체합니다.
    ///
    /// 설정하지 않으면 `max_line_bytes`가 적용된 기본 JSON 디코더를 사용합니다.
    pub fn parser(mut self, parser: ParserRouter) -> Self {
        self.parser = Some(parser);
        self
    }

    /// 규칙 엔진을 교체합니다.
    ///
    /// 설정하지 않으면 설정값으로 기본 규칙 목록을 구성합니다.
    pub fn rule_engine(mut self, rule_engine: RuleEngine) -> Self {
        self.rule_engine = Some(rule_engine);
        self
    }

    /// 설정을 검증하고 파이프라인을 빌드합니다.
    pub fn build(self) -> Result<LogPipeline, LogPipelineError> {
        self.config.validate()?;

        let parser = self
            .parser
            .unwrap_or_else(|| ParserRouter::with_defaults(self.config.max_line_bytes));
        let rule_engine = self
            .rule_engine
            .unwrap_or_else(|| RuleEngine::from_config(&self.config));

        tracing::debug!(
            formats = ?parser.registered_formats(),
            rules = ?rule_engine.rule_names(),
            "log pipeline built"
        );

        Ok(LogPipeline {
            config: self.config,
            parser,
            rule_engine,
        })
    }
}

impl Default for LogPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
