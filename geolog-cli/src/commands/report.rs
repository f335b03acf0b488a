//! `geolog report` command handler

use std::io::Write;

use serde::Serialize;

use geolog_core::config::GeologConfig;
use geolog_log_pipeline::{DashboardReport, PerformanceSummary, RunStats};

use crate::cli::ReportArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `report` command.
pub async fn execute(
    args: ReportArgs,
    config: &GeologConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let (store, stats) = super::run_pipeline(&args.file, config).await?;

    let report = ReportView {
        source: args.file.display().to_string(),
        stats,
        dashboard: store.query().dashboard(),
    };
    writer.render(&report)?;

    Ok(())
}

/// Dashboard for one processed file.
#[derive(Serialize)]
pub struct ReportView {
    /// Processed file path
    pub source: String,
    /// Run counters
    pub stats: RunStats,
    /// Performance, error and search summaries
    #[serde(flatten)]
    pub dashboard: DashboardReport,
}

const LABEL_WIDTH: usize = 25;

impl Render for ReportView {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let rule = "-".repeat(50);

        writeln!(
            w,
            "Processed {} log entries from {}",
            self.dashboard.processed,
            self.source.bold()
        )?;
        if self.stats.fallback_records > 0 {
            writeln!(
                w,
                "  {} lines were not structured and kept as raw records",
                self.stats.fallback_records
            )?;
        }

        writeln!(w)?;
        writeln!(w, "{}", "Performance Dashboard".bold())?;
        writeln!(w, "{}", rule)?;
        match &self.dashboard.performance {
            PerformanceSummary::Metrics(m) => {
                writeln!(w, "{:LABEL_WIDTH$}: {}", "total_requests", m.total_requests)?;
                writeln!(
                    w,
                    "{:LABEL_WIDTH$}: {:.2}",
                    "avg_response_time_ms", m.avg_response_time_ms
                )?;
                writeln!(
                    w,
                    "{:LABEL_WIDTH$}: {:.2}",
                    "avg_geocode_time_ms", m.avg_geocode_time_ms
                )?;
                let slow = m.slow_requests.to_string();
                let slow = if m.slow_requests > 0 {
                    slow.yellow().bold()
                } else {
                    slow.normal()
                };
                writeln!(w, "{:LABEL_WIDTH$}: {}", "slow_requests", slow)?;
                writeln!(
                    w,
                    "{:LABEL_WIDTH$}: {}",
                    "successful_geocodes", m.successful_geocodes
                )?;
                writeln!(w, "{:LABEL_WIDTH$}: {}", "failed_geocodes", m.failed_geocodes)?;
            }
            PerformanceSummary::Empty { message } => {
                writeln!(w, "{:LABEL_WIDTH$}: {}", "message", message)?;
            }
        }

        let errors = &self.dashboard.errors;
        writeln!(w)?;
        writeln!(w, "{}", "Error Tracking Dashboard".bold())?;
        writeln!(w, "{}", rule)?;
        writeln!(w, "{:LABEL_WIDTH$}: {}", "total_errors", errors.total_errors)?;
        writeln!(w, "{:LABEL_WIDTH$}: {}", "total_warnings", errors.total_warnings)?;
        writeln!(
            w,
            "{:LABEL_WIDTH$}: {} items",
            "error_messages",
            errors.error_messages.len()
        )?;
        for msg in &errors.error_messages {
            writeln!(w, "{:width$}* {}", "", msg.red(), width = LABEL_WIDTH + 2)?;
        }
        writeln!(
            w,
            "{:LABEL_WIDTH$}: {} items",
            "warning_messages",
            errors.warning_messages.len()
        )?;
        for msg in &errors.warning_messages {
            writeln!(w, "{:width$}* {}", "", msg.yellow(), width = LABEL_WIDTH + 2)?;
        }

        let searches = &self.dashboard.searches;
        writeln!(w)?;
        writeln!(w, "{}", "Search Examples".bold())?;
        writeln!(w, "{}", rule)?;
        writeln!(w, "Geocoding operations: {}", searches.geocoding_operations)?;
        writeln!(w, "Error level logs: {}", searches.error_logs)?;
        writeln!(w, "GeocodingAPI logs: {}", searches.geocoding_api_logs)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geolog_log_pipeline::{ErrorSummary, PerformanceMetrics, SearchCounts};

    fn view(performance: PerformanceSummary) -> ReportView {
        ReportView {
            source: "gis.log".to_owned(),
            stats: RunStats {
                lines_read: 3,
                records_stored: 3,
                fallback_records: 1,
                alerts_raised: 1,
            },
            dashboard: DashboardReport {
                processed: 3,
                performance,
                errors: ErrorSummary {
                    total_errors: 1,
                    total_warnings: 0,
                    error_messages: vec!["Geocoding failed".to_owned()],
                    warning_messages: Vec::new(),
                },
                searches: SearchCounts {
                    geocoding_operations: 2,
                    error_logs: 1,
                    geocoding_api_logs: 2,
                },
            },
        }
    }

    fn metrics() -> PerformanceSummary {
        PerformanceSummary::Metrics(PerformanceMetrics {
            total_requests: 1,
            avg_response_time_ms: 1050.0,
            avg_geocode_time_ms: 0.0,
            slow_requests: 1,
            successful_geocodes: 1,
            failed_geocodes: 1,
        })
    }

    #[test]
    fn render_text_shows_all_sections() {
        colored::control::set_override(false);

        let mut buf = Vec::new();
        view(metrics()).render_text(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.contains("Processed 3 log entries from gis.log"));
        assert!(out.contains("1 lines were not structured"));
        assert!(out.contains("avg_response_time_ms     : 1050.00"));
        assert!(out.contains("* Geocoding failed"));
        assert!(out.contains("GeocodingAPI logs: 2"));
    }

    #[test]
    fn render_text_without_performance_metrics() {
        colored::control::set_override(false);

        let mut buf = Vec::new();
        view(PerformanceSummary::empty())
            .render_text(&mut buf)
            .unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("No performance metrics found"));
        assert!(!out.contains("total_requests"));
    }

    #[test]
    fn json_flattens_dashboard_fields() {
        let json = serde_json::to_value(view(metrics())).unwrap();
        assert_eq!(json["processed"], 3);
        assert_eq!(json["stats"]["fallback_records"], 1);
        assert_eq!(json["performance"]["avg_response_time_ms"], 1050.0);
        assert_eq!(json["errors"]["total_errors"], 1);
        assert_eq!(json["searches"]["geocoding_operations"], 2);
    }
}
