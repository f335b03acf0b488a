//! `geolog search` command handler

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use geolog_core::config::GeologConfig;
use geolog_core::types::LogRecord;
use geolog_log_pipeline::SearchQuery;

use crate::cli::SearchArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `search` command.
pub async fn execute(
    args: SearchArgs,
    config: &GeologConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let (store, _stats) = super::run_pipeline(&args.file, config).await?;

    let mut query = SearchQuery::new();
    if let Some(text) = args.query {
        query = query.text(text);
    }
    if let Some(level) = args.level {
        query = query.level(level);
    }
    if let Some(logger) = args.logger {
        query = query.logger(logger);
    }

    let hits = store.query().search(&query);
    debug!(total = hits.len(), "search complete");

    let report = SearchReport::new(args.file.display().to_string(), &query, hits, args.limit);
    writer.render(&report)?;

    Ok(())
}

/// Search criteria echoed back in the report.
#[derive(Debug, Default, Serialize)]
pub struct SearchCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger: Option<String>,
}

impl From<&SearchQuery> for SearchCriteria {
    fn from(query: &SearchQuery) -> Self {
        Self {
            text: query.text.clone(),
            level: query.level.clone(),
            logger: query.logger.clone(),
        }
    }
}

/// Search result report.
///
/// `total_matches` counts every hit; `records` may be cut short by `--limit`.
#[derive(Serialize)]
pub struct SearchReport<'a> {
    /// Searched file path
    pub source: String,
    /// Applied criteria
    pub criteria: SearchCriteria,
    /// Number of matching records
    pub total_matches: usize,
    /// Matching records in line order
    pub records: Vec<&'a LogRecord>,
}

impl<'a> SearchReport<'a> {
    fn new(
        source: String,
        query: &SearchQuery,
        mut hits: Vec<&'a LogRecord>,
        limit: Option<usize>,
    ) -> Self {
        let total_matches = hits.len();
        if let Some(limit) = limit {
            hits.truncate(limit);
        }
        Self {
            source,
            criteria: SearchCriteria::from(query),
            total_matches,
            records: hits,
        }
    }
}

impl Render for SearchReport<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Search: {} ({} matches)",
            self.source.bold(),
            self.total_matches
        )?;

        if self.records.is_empty() {
            writeln!(w, "  No matching records.")?;
            return Ok(());
        }

        for record in &self.records {
            let level = match record.level.as_str() {
                "error" => record.level.red().bold(),
                "warn" => record.level.yellow(),
                _ => record.level.normal(),
            };
            writeln!(
                w,
                "  #{:<5} {:<5} {:<15} {}",
                record.line_number, level, record.logger, record.message
            )?;
        }

        if self.records.len() < self.total_matches {
            writeln!(
                w,
                "  ... {} more",
                self.total_matches - self.records.len()
            )?;
        }

        Ok(())
    }
}
