//! Config loading for CLI commands, keeping the file text for diagnostics.

use std::fs;
use std::path::{Path, PathBuf};

use crate::adapter::inbound::cli::command::Cli;
use crate::adapter::inbound::cli::diagnostic;
use crate::app::config::DEFAULT_CONFIG_PATH;
use crate::app::Config;
use crate::error::ConfigError;

/// A validated config and the file it came from, if any.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: Option<PathBuf>,
}

/// Explicit path, else `./config.toml` when present, else defaults.
///
/// Errors are rendered diagnostics; parse failures point into the file.
pub fn load(path: Option<&Path>) -> miette::Result<LoadedConfig> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            default.exists().then(|| default.to_path_buf())
        }
    };

    let Some(path) = path else {
        let config = Config::load_or_default(None).map_err(|e| diagnostic::report(e, None))?;
        return Ok(LoadedConfig { config, path: None });
    };

    let src = fs::read_to_string(&path)
        .map_err(|e| diagnostic::report(ConfigError::ReadFile(e).into(), None))?;
    let name = path.display().to_string();
    let config =
        Config::parse(&src).map_err(|e| diagnostic::report(e, Some((name.as_str(), src.clone()))))?;

    Ok(LoadedConfig {
        config,
        path: Some(path),
    })
}

/// Apply `--log-level`, `-v` and `--json-logs` on top of `[logging]`.
pub fn apply_log_flags(config: &mut Config, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    } else if cli.verbose >= 2 {
        config.logging.level = "trace".into();
    } else if cli.verbose == 1 {
        config.logging.level = "debug".into();
    }

    // Styled logs would interleave with JSON output on the terminal.
    if cli.json_logs || cli.json {
        config.logging.format = "json".into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_verbose_raises_level_unless_overridden() {
        let mut config = Config::default();
        apply_log_flags(&mut config, &Cli::parse_from(["b3-screener", "-v", "strategies"]));
        assert_eq!(config.logging.level, "debug");

        let mut config = Config::default();
        let cli = Cli::parse_from(["b3-screener", "-vv", "--log-level", "warn", "strategies"]);
        apply_log_flags(&mut config, &cli);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_json_output_forces_json_logs() {
        let mut config = Config::default();
        apply_log_flags(&mut config, &Cli::parse_from(["b3-screener", "--json", "strategies"]));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screener.toml");
        fs::write(&path, "[enrichment]\nconcurrency = 3\n").unwrap();

        let loaded = load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.config.enrichment.concurrency, 3);
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
    }
}
