//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "geolog.toml";

/// geolog -- GIS log enrichment and dashboard tool.
///
/// Use `geolog <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "geolog", version, about, long_about = None)]
pub struct Cli {
    /// Path to the geolog.toml configuration file.
    ///
    /// When omitted, `geolog.toml` is used if present, otherwise built-in
    /// defaults plus `GEOLOG_*` environment overrides.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enrich a log file and print the resulting documents.
    Process(ProcessArgs),

    /// Search enriched records by text, level and logger.
    Search(SearchArgs),

    /// Print the performance and error dashboard for a log file.
    Report(ReportArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- process ----

/// Enrich a log file.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Log file to process.
    pub file: PathBuf,
}

// ---- search ----

/// Filtered search over an enriched log file.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Log file to search.
    pub file: PathBuf,

    /// Case-insensitive substring of the message.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Exact level (info, warn, error, ...).
    #[arg(long)]
    pub level: Option<String>,

    /// Exact logger name.
    #[arg(long)]
    pub logger: Option<String>,

    /// Maximum number of matches to print (all matches are counted).
    #[arg(long)]
    pub limit: Option<usize>,
}

// ---- report ----

/// Dashboard report for a log file.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Log file to summarise.
    pub file: PathBuf,
}

// ---- config ----

/// Manage geolog configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, enrichment).
        #[arg(long)]
        section: Option<String>,
    },
}
