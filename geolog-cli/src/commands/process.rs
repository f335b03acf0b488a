//! `geolog process` command handler

use std::io::Write;

use serde::Serialize;

use geolog_core::config::GeologConfig;
use geolog_core::types::LogRecord;
use geolog_log_pipeline::RunStats;
use geolog_log_pipeline::export::write_ndjson;

use crate::cli::{OutputFormat, ProcessArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `process` command.
///
/// JSON output is newline-delimited: one index document per record, ready
/// for bulk ingestion. Text output lists one line per record.
pub async fn execute(
    args: ProcessArgs,
    config: &GeologConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let (store, stats) = super::run_pipeline(&args.file, config).await?;

    match writer.format() {
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_ndjson(store.iter(), &mut handle)?;
        }
        OutputFormat::Text => {
            let report = ProcessReport {
                source: args.file.display().to_string(),
                stats,
                records: store.records(),
            };
            writer.render(&report)?;
        }
    }

    Ok(())
}

/// Enriched records of one processed file.
#[derive(Serialize)]
pub struct ProcessReport<'a> {
    /// Processed file path
    pub source: String,
    /// Run counters
    pub stats: RunStats,
    /// Records in line order
    pub records: &'a [LogRecord],
}

impl Render for ProcessReport<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for record in self.records {
            write!(w, "{}", record)?;
            if let Some(alert) = record.alert {
                write!(w, " {}", format!("[{}]", alert).yellow().bold())?;
            }
            if let Some(op) = record.operation_type {
                write!(w, " ({})", op)?;
            }
            writeln!(w)?;
        }

        writeln!(w)?;
        writeln!(
            w,
            "{} {} records from {} ({} fallback, {} alerts)",
            "Processed".green().bold(),
            self.stats.records_stored,
            self.source,
            self.stats.fallback_records,
            self.stats.alerts_raised,
        )?;

        Ok(())
    }
}
