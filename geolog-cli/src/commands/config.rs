//! `geolog config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::cli::{ConfigAction, ConfigArgs, DEFAULT_CONFIG_PATH};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Sections accepted by `config show --section`.
pub const SECTIONS: [&str; 2] = ["general", "enrichment"];

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: Option<&Path>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Load and validate the configuration, reporting any errors.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails (invalid values, parse errors,
/// missing explicit file).
async fn execute_validate(
    config_path: Option<&Path>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!("validating configuration");

    let report = match super::load_config(config_path).await {
        Ok((_, source)) => ConfigValidationReport {
            source,
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: source_label(config_path),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Display the effective configuration (file + env overrides + defaults).
///
/// # Errors
///
/// Returns `CliError::Config` if loading fails or `CliError::Command` if the
/// section name is unknown.
async fn execute_show(
    config_path: Option<&Path>,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let (config, source) = super::load_config(config_path).await?;
    info!(source = %source, "showing configuration");

    let (config_toml, value) = match section.as_deref() {
        None => (
            toml::to_string_pretty(&config),
            serde_json::to_value(&config)?,
        ),
        Some("general") => (
            toml::to_string_pretty(&config.general),
            serde_json::to_value(&config.general)?,
        ),
        Some("enrichment") => (
            toml::to_string_pretty(&config.enrichment),
            serde_json::to_value(&config.enrichment)?,
        ),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: {})",
                other,
                SECTIONS.join(", ")
            )));
        }
    };

    let report = ConfigReport {
        source,
        section,
        config: value,
        config_toml: config_toml.unwrap_or_else(|e| format!("(serialization error: {})", e)),
    };
    writer.render(&report)?;

    Ok(())
}

fn source_label(config_path: Option<&Path>) -> String {
    match config_path {
        Some(path) => path.display().to_string(),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => DEFAULT_CONFIG_PATH.to_owned(),
        None => super::DEFAULTS_SOURCE.to_owned(),
    }
}

/// Configuration display report.
///
/// `config_toml` is only used for text rendering; JSON output carries the
/// structured `config` value instead.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Where the configuration came from
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Effective configuration (or the selected section)
    pub config: serde_json::Value,
    /// Serialized TOML configuration
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration source
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_report_renders_errors() {
        colored::control::set_override(false);

        let report = ConfigValidationReport {
            source: "geolog.toml".to_owned(),
            valid: false,
            errors: vec!["invalid config value for 'general.log_level'".to_owned()],
        };
        let mut buf = Vec::new();
        report.render_text(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("INVALID"));
        assert!(out.contains("general.log_level"));
    }

    #[test]
    fn config_report_json_skips_toml_text() {
        let report = ConfigReport {
            source: "(defaults)".to_owned(),
            section: None,
            config: serde_json::json!({ "general": { "log_level": "info" } }),
            config_toml: "[general]\nlog_level = \"info\"\n".to_owned(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("config_toml").is_none());
        assert!(json.get("section").is_none());
        assert_eq!(json["config"]["general"]["log_level"], "info");
    }

    #[test]
    fn source_label_prefers_explicit_path() {
        assert_eq!(source_label(None), "(defaults)");
        assert_eq!(
            source_label(Some(Path::new("/etc/geolog.toml"))),
            "/etc/geolog.toml"
        );
    }
}
