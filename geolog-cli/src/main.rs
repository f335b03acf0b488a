//! geolog -- GIS log enrichment command-line tool
//!
//! Reads a structured log file, enriches every line and prints documents,
//! search results or a dashboard report.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::path::Path;

use clap::Parser;
use colored::Colorize;

use geolog_core::config::{GeneralConfig, GeologConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let writer = OutputWriter::new(cli.output);

    geolog_core::metrics::describe_all();

    if let Err(e) = run(cli, &writer).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, writer: &OutputWriter) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();
    let log_level = cli.log_level.as_deref();

    match cli.command {
        Commands::Process(args) => {
            let config = prepare(config_path, log_level).await?;
            commands::process::execute(args, &config, writer).await
        }
        Commands::Search(args) => {
            let config = prepare(config_path, log_level).await?;
            commands::search::execute(args, &config, writer).await
        }
        Commands::Report(args) => {
            let config = prepare(config_path, log_level).await?;
            commands::report::execute(args, &config, writer).await
        }
        Commands::Config(args) => {
            // The config command reports load failures itself.
            init_logging(&GeneralConfig::default(), log_level)?;
            commands::config::execute(args, config_path, writer).await
        }
    }
}

/// Load the configuration and install the tracing subscriber.
async fn prepare(
    config_path: Option<&Path>,
    log_level: Option<&str>,
) -> Result<GeologConfig, CliError> {
    let (config, source) = commands::load_config(config_path).await?;
    init_logging(&config.general, log_level)?;
    tracing::debug!(source = %source, "configuration loaded");
    Ok(config)
}

fn init_logging(general: &GeneralConfig, log_level: Option<&str>) -> Result<(), CliError> {
    let mut general = general.clone();
    if let Some(level) = log_level {
        general.log_level = level.to_owned();
    }
    logging::init_tracing(&general).map_err(|e| CliError::Config(e.to_string()))
}
