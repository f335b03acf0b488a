//! CLI-specific error types and exit code mapping

use geolog_core::error::GeologError;
use geolog_log_pipeline::LogPipelineError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The log source could not be read.
    #[error("input error: {0}")]
    Input(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from geolog-core.
    #[error("{0}")]
    Core(#[from] GeologError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                               |
    /// |------|---------------------------------------|
    /// | 0    | Success                               |
    /// | 1    | General / command error               |
    /// | 2    | Configuration error                   |
    /// | 10   | IO error (including a missing input)  |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(GeologError::Config(_)) => 2,
            Self::Input(_) | Self::Io(_) | Self::Core(GeologError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

impl From<LogPipelineError> for CliError {
    fn from(e: LogPipelineError) -> Self {
        match e {
            LogPipelineError::Collector { .. } | LogPipelineError::Io(_) => {
                Self::Input(e.to_string())
            }
            LogPipelineError::Config { .. } => Self::Config(e.to_string()),
            LogPipelineError::Serialize(inner) => Self::JsonSerialize(inner),
            LogPipelineError::Parse { .. } | LogPipelineError::OutOfOrder { .. } => {
                Self::Command(e.to_string())
            }
        }
    }
}
