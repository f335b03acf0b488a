//! Command handlers -- one module per subcommand

pub mod config;
pub mod process;
pub mod report;
pub mod search;

use std::path::Path;

use tracing::{debug, info};

use geolog_core::config::GeologConfig;
use geolog_log_pipeline::{LogPipelineBuilder, PipelineConfig, RecordStore, RunStats};

use crate::cli::DEFAULT_CONFIG_PATH;
use crate::error::CliError;

/// Label used when no configuration file was read.
pub const DEFAULTS_SOURCE: &str = "(defaults)";

/// Resolve and load the effective configuration.
///
/// An explicit path must exist. Without one, `geolog.toml` in the working
/// directory is used when present, otherwise defaults plus `GEOLOG_*`
/// environment overrides.
///
/// Returns the configuration together with a label describing its source.
pub async fn load_config(explicit: Option<&Path>) -> Result<(GeologConfig, String), CliError> {
    if let Some(path) = explicit {
        let config = GeologConfig::load(path).await?;
        return Ok((config, path.display().to_string()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        debug!(path = DEFAULT_CONFIG_PATH, "using configuration from working directory");
        let config = GeologConfig::load(default_path).await?;
        return Ok((config, DEFAULT_CONFIG_PATH.to_owned()));
    }

    debug!("no configuration file found, using defaults");
    Ok((GeologConfig::from_env()?, DEFAULTS_SOURCE.to_owned()))
}

/// Build a pipeline from `config` and run it over `file`.
pub async fn run_pipeline(
    file: &Path,
    config: &GeologConfig,
) -> Result<(RecordStore, RunStats), CliError> {
    let pipeline = LogPipelineBuilder::new()
        .config(PipelineConfig::from_core(&config.enrichment))
        .build()?;

    info!(file = %file.display(), "processing log file");
    let (store, stats) = pipeline.run_file(file).await?;
    Ok((store, stats))
}
