//! CLI integration tests. None of these reach the network.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn screener() -> Command {
    cargo_bin_cmd!("b3-screener")
}

fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}

#[test]
fn test_help_lists_commands() {
    screener()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("screen"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("snowball"));
}

#[test]
fn test_version() {
    screener()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("b3-screener"));
}

#[test]
fn test_strategies_table() {
    screener()
        .arg("strategies")
        .assert()
        .success()
        .stdout(predicate::str::contains("BAZIN"))
        .stdout(predicate::str::contains("TIJOLO_VALUE"))
        .stdout(predicate::str::contains("HIGH_VOLATILITY"));
}

#[test]
fn test_strategies_json() {
    let output = screener().args(["--json", "strategies"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("one JSON document");
    assert_eq!(value["command"], "strategies");
    assert_eq!(value["strategies"].as_array().unwrap().len(), 11);
}

#[test]
fn test_config_validate_accepts_valid_file() {
    let (_dir, path) = write_config("[enrichment]\nconcurrency = 2\n");
    screener()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_config_validate_rejects_bad_value() {
    let (_dir, path) = write_config("[enrichment]\nconcurrency = 0\n");
    screener()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("enrichment.concurrency"));
}

#[test]
fn test_config_syntax_error_points_at_file() {
    let (_dir, path) = write_config("[screening]\nfallback_selic = \"high\"\n");
    screener()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.toml"));
}

#[test]
fn test_screen_rejects_unknown_asset_type() {
    let (_dir, path) = write_config("");
    screener()
        .args(["screen", "--type", "crypto", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("asset_type"));
}

#[test]
fn test_history_without_tickers_or_saved_results() {
    let (dir, path) = write_config("");
    fs::write(
        &path,
        format!(
            "[output]\nhistory_dir = {:?}\n",
            dir.path().join("history").display().to_string()
        ),
    )
    .unwrap();

    screener()
        .args(["history", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No tickers"));
}
