//! Integration tests for `geolog config` loading behaviour.
//!
//! Tests config validation with real TOML files.

use std::fs;
use tempfile::TempDir;

use geolog_core::config::GeologConfig;

#[tokio::test]
async fn test_config_validate_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("geolog.toml");

    let valid_config = r#"
[general]
log_level = "info"
log_format = "json"

[enrichment]
service_name = "gis-geocoding-api"
environment = "production"
version = "2.3.1"
response_time_threshold_ms = 1500.0
geocode_time_threshold_ms = 750.0
"#;

    fs::write(&config_path, valid_config).expect("should write config");

    // When: Loading the config
    let config = GeologConfig::load(&config_path)
        .await
        .expect("valid config should load successfully");

    // Then: Values come from the file, omitted fields keep defaults
    assert_eq!(config.enrichment.environment, "production");
    assert_eq!(config.enrichment.response_time_threshold_ms, 1500.0);
    assert!(config.enrichment.max_line_bytes > 0);
}

#[tokio::test]
async fn test_config_validate_malformed_toml() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("bad.toml");

    let malformed_config = r#"
[general
log_level = "info"
"#;

    fs::write(&config_path, malformed_config).expect("should write bad config");

    let result = GeologConfig::load(&config_path).await;
    assert!(result.is_err(), "malformed TOML should fail to load");
}

#[tokio::test]
async fn test_config_validate_missing_file() {
    let config_path = std::path::PathBuf::from("/nonexistent/geolog.toml");

    let result = GeologConfig::load(&config_path).await;
    assert!(result.is_err(), "missing file should fail to load");
}

#[tokio::test]
async fn test_config_validate_empty_file() {
    // Given: An empty config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("empty.toml");

    fs::write(&config_path, "").expect("should write empty file");

    // When: Loading the config
    let config = GeologConfig::load(&config_path)
        .await
        .expect("empty config should fall back to defaults");

    // Then: Defaults apply
    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.enrichment.service_name, "gis-geocoding-api");
}

#[tokio::test]
async fn test_config_negative_threshold_rejected() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("geolog.toml");

    fs::write(
        &config_path,
        "[enrichment]\nresponse_time_threshold_ms = -1.0\n",
    )
    .expect("should write config");

    let err = GeologConfig::load(&config_path)
        .await
        .expect_err("negative threshold should be rejected");
    assert!(err.to_string().contains("response_time_threshold_ms"));
}

#[tokio::test]
async fn test_config_unicode_values() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("geolog.toml");

    fs::write(
        &config_path,
        "[enrichment]\nservice_name = \"지오코딩-서비스\"\nenvironment = \"개발\"\n",
    )
    .expect("should write config");

    let config = GeologConfig::load(&config_path)
        .await
        .expect("unicode values should load");
    assert_eq!(config.enrichment.service_name, "지오코딩-서비스");
    assert_eq!(config.enrichment.environment, "개발");
}

#[tokio::test]
async fn test_config_show_round_trips_through_toml() {
    let config = GeologConfig::default();
    let rendered = toml::to_string_pretty(&config).expect("default config should serialize");

    assert!(rendered.contains("[general]"));
    assert!(rendered.contains("[enrichment]"));

    let reparsed = GeologConfig::parse(&rendered).expect("rendered config should parse");
    assert_eq!(reparsed.enrichment.version, config.enrichment.version);
    assert_eq!(
        reparsed.enrichment.geocode_time_threshold_ms,
        config.enrichment.geocode_time_threshold_ms
    );
}
