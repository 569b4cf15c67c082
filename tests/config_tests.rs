use std::fs;
use std::path::Path;

use b3_screener::app::Config;
use b3_screener::error::{ConfigError, Error};

fn load(contents: &str) -> Result<Config, Error> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    Config::load(&path)
}

#[test]
fn config_full_file_overrides_defaults() {
    let config = load(
        r#"
[logging]
level = "debug"
format = "json"

[sources]
fundamentus_url = "http://localhost:8080"
timeout_secs = 3

[enrichment]
concurrency = 8
delay_ms = 0
top_stocks = 10

[screening]
fallback_selic = 13.25
final_min_score = 6.0

[output]
snapshot_path = "public/data.js"
history_dir = "archive"
dividend_max_age_hours = 12
"#,
    )
    .unwrap();

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.sources.fundamentus_url, "http://localhost:8080");
    assert_eq!(config.sources.timeout().as_secs(), 3);
    assert_eq!(config.enrichment.policy().concurrency, 8);
    assert!(config.enrichment.policy().delay.is_zero());
    assert_eq!(config.enrichment.top_stocks, 10);
    assert_eq!(config.screening.rate(None).value(), 13.25);
    assert_eq!(config.screening.rate(Some(10.5)).value(), 10.5);
    assert_eq!(config.output.snapshot_path, Path::new("public/data.js"));
    assert_eq!(config.output.dividend_max_age().as_secs(), 12 * 3600);
    // Untouched sections keep their defaults.
    assert_eq!(config.sources.brapi_url, "https://brapi.dev/api");
}

#[test]
fn config_rejects_malformed_url() {
    match load("[sources]\nbcb_sgs_url = \"not a url\"\n") {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "sources.bcb_sgs_url",
            ..
        })) => {}
        other => panic!("expected invalid url, got {other:?}"),
    }
}

#[test]
fn config_rejects_blank_url() {
    match load("[sources]\ndollar_url = \"  \"\n") {
        Err(Error::Config(ConfigError::MissingField {
            field: "sources.dollar_url",
        })) => {}
        other => panic!("expected missing url, got {other:?}"),
    }
}

#[test]
fn config_rejects_inverted_score_thresholds() {
    let err = load("[screening]\nfirst_pass_min_score = 7.0\nfinal_min_score = 5.0\n").unwrap_err();
    assert!(err.to_string().contains("first_pass_min_score"));
}

#[test]
fn config_rejects_out_of_range_score() {
    let err = load("[screening]\nfinal_min_score = 11.0\n").unwrap_err();
    assert!(err.to_string().contains("final_min_score"));
}

#[test]
fn config_rejects_non_positive_fallback_rate() {
    let err = load("[screening]\nfallback_selic = 0.0\n").unwrap_err();
    assert!(err.to_string().contains("fallback_selic"));
}

#[test]
fn config_type_error_is_a_parse_error() {
    match load("[enrichment]\nconcurrency = \"many\"\n") {
        Err(Error::Config(ConfigError::Parse(e))) => assert!(e.span().is_some()),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn config_missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    match Config::load(dir.path().join("absent.toml")) {
        Err(Error::Config(ConfigError::ReadFile(_))) => {}
        other => panic!("expected read error, got {other:?}"),
    }
}
