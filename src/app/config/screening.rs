//! Enrichment pool, scoring thresholds and output locations.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::app::enrichment::EnrichmentPolicy;
use crate::domain::BenchmarkRate;
use crate::scoring::rank::{StockSelection, FINAL_MIN_SCORE};

/// Enrichment worker pool settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Pause between two requests of the same worker.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Top ranked stocks enriched for dividend display data. Zero disables.
    #[serde(default)]
    pub top_stocks: usize,
}

impl EnrichmentConfig {
    #[must_use]
    pub fn policy(&self) -> EnrichmentPolicy {
        EnrichmentPolicy {
            concurrency: self.concurrency,
            delay: Duration::from_millis(self.delay_ms),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            delay_ms: default_delay_ms(),
            timeout_secs: default_timeout_secs(),
            top_stocks: 0,
        }
    }
}

/// Scoring thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningConfig {
    /// Benchmark rate used when the live lookup fails.
    #[serde(default = "default_fallback_selic")]
    pub fallback_selic: f64,
    /// Looser threshold selecting enrichment candidates.
    #[serde(default = "default_first_pass_min_score")]
    pub first_pass_min_score: f64,
    #[serde(default = "default_final_min_score")]
    pub final_min_score: f64,
    #[serde(default = "default_min_stock_liquidity")]
    pub min_stock_liquidity: f64,
    #[serde(default = "default_star_min_liquidity")]
    pub star_min_liquidity: f64,
}

impl ScreeningConfig {
    #[must_use]
    pub fn stock_selection(&self) -> StockSelection {
        StockSelection {
            min_liquidity: self.min_stock_liquidity,
            star_min_liquidity: self.star_min_liquidity,
        }
    }

    /// Rate from an optional lookup, falling back to the configured value.
    #[must_use]
    pub fn rate(&self, selic: Option<f64>) -> BenchmarkRate {
        BenchmarkRate::from_option(selic, self.fallback_selic)
    }
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            fallback_selic: default_fallback_selic(),
            first_pass_min_score: default_first_pass_min_score(),
            final_min_score: default_final_min_score(),
            min_stock_liquidity: default_min_stock_liquidity(),
            star_min_liquidity: default_star_min_liquidity(),
        }
    }
}

/// Where artifacts are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    #[serde(default = "default_history_dir")]
    pub history_dir: PathBuf,
    #[serde(default = "default_snowball_path")]
    pub snowball_path: PathBuf,
    /// Dividend history files younger than this are not fetched again.
    #[serde(default = "default_dividend_max_age_hours")]
    pub dividend_max_age_hours: u64,
}

impl OutputConfig {
    #[must_use]
    pub fn dividend_max_age(&self) -> Duration {
        Duration::from_secs(self.dividend_max_age_hours * 3600)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            history_dir: default_history_dir(),
            snowball_path: default_snowball_path(),
            dividend_max_age_hours: default_dividend_max_age_hours(),
        }
    }
}

const fn default_concurrency() -> usize {
    5
}

const fn default_delay_ms() -> u64 {
    150
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_fallback_selic() -> f64 {
    BenchmarkRate::FALLBACK
}

const fn default_first_pass_min_score() -> f64 {
    4.0
}

const fn default_final_min_score() -> f64 {
    FINAL_MIN_SCORE
}

const fn default_min_stock_liquidity() -> f64 {
    200_000.0
}

const fn default_star_min_liquidity() -> f64 {
    300_000.0
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data.js")
}

fn default_history_dir() -> PathBuf {
    PathBuf::from("history")
}

fn default_snowball_path() -> PathBuf {
    PathBuf::from("bola_de_neve.csv")
}

const fn default_dividend_max_age_hours() -> u64 {
    24
}
