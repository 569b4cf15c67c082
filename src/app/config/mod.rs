//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for secrets like `BRAPI_TOKEN`. Every section is optional.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

mod logging;
mod screening;
mod sources;

pub use logging::LoggingConfig;
pub use screening::{EnrichmentConfig, OutputConfig, ScreeningConfig};
pub use sources::SourcesConfig;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub screening: ScreeningConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse and validate TOML text, applying environment overrides.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when given, else `config.toml` if present, else defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => {
                let mut config = Self::default();
                config.apply_env();
                Ok(config)
            }
        }
    }

    fn apply_env(&mut self) {
        // Never read from the config file.
        self.sources.brapi_token = std::env::var("BRAPI_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("sources.fundamentus_url", &self.sources.fundamentus_url),
            ("sources.brapi_url", &self.sources.brapi_url),
            ("sources.investidor10_url", &self.sources.investidor10_url),
            ("sources.bcb_sgs_url", &self.sources.bcb_sgs_url),
            ("sources.dollar_url", &self.sources.dollar_url),
        ];
        for (field, value) in urls {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
            if let Err(e) = url::Url::parse(value) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: e.to_string(),
                }
                .into());
            }
        }

        if self.sources.timeout_secs == 0 {
            return Err(invalid("sources.timeout_secs", "must be greater than zero"));
        }
        if self.enrichment.concurrency == 0 {
            return Err(invalid("enrichment.concurrency", "must be at least 1"));
        }
        if self.enrichment.timeout_secs == 0 {
            return Err(invalid("enrichment.timeout_secs", "must be greater than zero"));
        }

        let screening = &self.screening;
        if !screening.fallback_selic.is_finite() || screening.fallback_selic <= 0.0 {
            return Err(invalid("screening.fallback_selic", "must be a positive percentage"));
        }
        for (field, score) in [
            ("screening.first_pass_min_score", screening.first_pass_min_score),
            ("screening.final_min_score", screening.final_min_score),
        ] {
            if !(0.0..=10.0).contains(&score) {
                return Err(invalid(field, "must be between 0 and 10"));
            }
        }
        if screening.first_pass_min_score > screening.final_min_score {
            return Err(invalid(
                "screening.first_pass_min_score",
                "must not exceed final_min_score",
            ));
        }
        if screening.star_min_liquidity < screening.min_stock_liquidity {
            return Err(invalid(
                "screening.star_min_liquidity",
                "must not be below min_stock_liquidity",
            ));
        }

        if self.output.snapshot_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "output.snapshot_path",
            }
            .into());
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.enrichment.concurrency, 5);
        assert_eq!(config.enrichment.delay_ms, 150);
        assert_eq!(config.screening.final_min_score, 5.5);
        assert_eq!(config.screening.first_pass_min_score, 4.0);
        assert_eq!(config.output.snapshot_path, Path::new("data.js"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = Config::parse("[enrichment]\nconcurrency = 0\n").unwrap_err();
        assert!(err.to_string().contains("enrichment.concurrency"));
    }

    #[test]
    fn test_blank_url_rejected() {
        let err = Config::parse("[sources]\nbrapi_url = \"\"\n").unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::MissingField {
                field: "sources.brapi_url"
            })
        ));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let toml = "[screening]\nfirst_pass_min_score = 7.0\nfinal_min_score = 5.5\n";
        assert!(Config::parse(toml).is_err());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Config::parse("[enrichment\n").unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(ConfigError::Parse(_))));
    }
}
