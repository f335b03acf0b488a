//! End-to-end tests driving the `geolog` binary.
//!
//! Each test runs in its own temp directory so no stray `geolog.toml`
//! is picked up from the working directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const GIS_LOG: &str = r#"{"timestamp":"2024-01-15T12:00:00.100Z","level":"info","logger":"HttpServer","message":"Server started | port:8080"}
{"timestamp":"2024-01-15T12:00:01.200Z","level":"info","logger":"GeocodingAPI","message":"Geocoding successful | address:Main_St geocode_time_ms:120 response_time_ms:180 | correlation_id:req-1"}
{"timestamp":"2024-01-15T12:00:02.300Z","level":"error","logger":"GeocodingAPI","message":"HTTP request failed | response_time_ms:2000"}
Segmentation fault (core dumped)
"#;

fn geolog(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_geolog"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "error")
        .output()
        .expect("should spawn geolog")
}

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("should create temp dir");
    fs::write(dir.path().join("gis.log"), GIS_LOG).expect("should write log");
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be UTF-8")
}

#[test]
fn process_json_emits_one_document_per_line() {
    let dir = workspace();
    let output = geolog(dir.path(), &["--output", "json", "process", "gis.log"]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let docs: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line should be a JSON document"))
        .collect();

    assert_eq!(docs.len(), 4);
    for (i, doc) in docs.iter().enumerate() {
        assert_eq!(doc["line_number"], (i + 1) as u64);
        assert_eq!(doc["@timestamp"], doc["timestamp"]);
        assert_eq!(doc["service"], "gis-geocoding-api");
    }

    assert_eq!(docs[1]["correlation_id"], "req-1");
    assert_eq!(docs[1]["performance"]["geocode_time_ms"], 120.0);
    assert_eq!(docs[2]["alert"], "slow_response");
    assert_eq!(docs[3]["logger"], "raw");
    assert_eq!(docs[3]["message"], "Segmentation fault (core dumped)");
}

#[test]
fn process_text_lists_records() {
    let dir = workspace();
    let output = geolog(dir.path(), &["process", "gis.log"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("#1 [info] HttpServer: Server started"));
    assert!(out.contains("#4 [info] raw: Segmentation fault (core dumped)"));
}

#[test]
fn search_json_filters_by_level_and_logger() {
    let dir = workspace();
    let output = geolog(
        dir.path(),
        &[
            "--output",
            "json",
            "search",
            "gis.log",
            "--level",
            "error",
            "--logger",
            "GeocodingAPI",
        ],
    );
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("search output should be JSON");
    assert_eq!(report["total_matches"], 1);
    assert_eq!(report["records"][0]["message"], "HTTP request failed");
    assert_eq!(report["criteria"]["level"], "error");
}

#[test]
fn report_json_contains_dashboard() {
    let dir = workspace();
    let output = geolog(dir.path(), &["--output", "json", "report", "gis.log"]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("report output should be JSON");
    assert_eq!(report["processed"], 4);
    assert_eq!(report["stats"]["fallback_records"], 1);
    assert_eq!(report["performance"]["slow_requests"], 1);
    assert_eq!(report["performance"]["avg_response_time_ms"], 1090.0);
    assert_eq!(report["errors"]["total_errors"], 1);
    assert_eq!(report["searches"]["geocoding_api_logs"], 2);
}

#[test]
fn report_uses_working_directory_config() {
    let dir = workspace();
    fs::write(
        dir.path().join("geolog.toml"),
        "[enrichment]\nresponse_time_threshold_ms = 5000.0\n",
    )
    .expect("should write config");

    let output = geolog(dir.path(), &["--output", "json", "report", "gis.log"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["performance"]["slow_requests"], 0);
}

#[test]
fn missing_input_exits_with_io_code() {
    let dir = TempDir::new().unwrap();
    let output = geolog(dir.path(), &["report", "does-not-exist.log"]);

    assert_eq!(output.status.code(), Some(10));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does-not-exist.log"));
}

#[test]
fn missing_explicit_config_exits_with_config_code() {
    let dir = workspace();
    let output = geolog(
        dir.path(),
        &["--config", "missing.toml", "process", "gis.log"],
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn empty_input_yields_empty_results() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty.log"), "\n  \n").unwrap();

    let output = geolog(dir.path(), &["--output", "json", "process", "empty.log"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());

    let output = geolog(dir.path(), &["--output", "json", "report", "empty.log"]);
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["processed"], 0);
    assert_eq!(report["performance"]["message"], "No performance metrics found");
}

#[test]
fn config_validate_reports_invalid_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("geolog.toml"),
        "[general]\nlog_level = \"loud\"\n",
    )
    .unwrap();

    let output = geolog(dir.path(), &["--output", "json", "config", "validate"]);
    assert_eq!(output.status.code(), Some(2));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["source"], "geolog.toml");
}

#[test]
fn config_show_section() {
    let dir = TempDir::new().unwrap();
    let output = geolog(
        dir.path(),
        &["--output", "json", "config", "show", "--section", "enrichment"],
    );
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["source"], "(defaults)");
    assert_eq!(report["section"], "enrichment");
    assert_eq!(report["config"]["service_name"], "gis-geocoding-api");
}
