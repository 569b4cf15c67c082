//! User-facing filters over a single-class screening run.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use tracing::info;

use super::history::HistoryStore;
use super::reconcile::{AssetScope, Reconciler, Screening};
use crate::domain::Ranked;
use crate::error::{ConfigError, Error, Result};

/// Asset class a screener runs over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssetType {
    #[default]
    Stock,
    Fii,
}

impl AssetType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Fii => "fii",
        }
    }
}

impl FromStr for AssetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(Self::Stock),
            "fii" => Ok(Self::Fii),
            other => Err(ConfigError::InvalidValue {
                field: "asset_type",
                reason: format!("{other:?}; use \"stock\" or \"fii\""),
            }
            .into()),
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter thresholds. Defaults keep everything.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenFilters {
    pub min_liquidity: f64,
    pub min_yield: f64,
    pub max_pb: f64,
    pub min_pb: f64,
    /// Stocks only.
    pub max_debt_to_equity: f64,
    pub min_score: f64,
    /// Strategy or category labels to exclude.
    pub exclude_strategies: Vec<String>,
}

impl Default for ScreenFilters {
    fn default() -> Self {
        Self {
            min_liquidity: 0.0,
            min_yield: 0.0,
            max_pb: 999.0,
            min_pb: 0.0,
            max_debt_to_equity: 999.0,
            min_score: 0.0,
            exclude_strategies: Vec::new(),
        }
    }
}

/// Filtered results of one screener run.
#[derive(Debug, Clone)]
pub struct ScreenResult {
    pub asset_type: AssetType,
    pub screening: Screening,
}

impl ScreenResult {
    /// Number of kept assets of the screened class.
    #[must_use]
    pub fn len(&self) -> usize {
        match self.asset_type {
            AssetType::Stock => self.screening.stocks.len(),
            AssetType::Fii => self.screening.funds.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fluent screener; invalid options fail before any I/O.
#[derive(Debug, Clone, Default)]
pub struct Screener {
    asset_type: AssetType,
    filters: ScreenFilters,
    save: bool,
}

impl Screener {
    #[must_use]
    pub fn builder() -> Self {
        Self::default()
    }

    /// `stock` or `fii`, case-insensitive.
    #[allow(clippy::result_large_err)]
    pub fn asset_type(mut self, asset_type: &str) -> Result<Self> {
        self.asset_type = asset_type.parse()?;
        Ok(self)
    }

    #[must_use]
    pub fn min_liquidity(mut self, value: f64) -> Self {
        self.filters.min_liquidity = value;
        self
    }

    #[must_use]
    pub fn min_yield(mut self, value: f64) -> Self {
        self.filters.min_yield = value;
        self
    }

    #[must_use]
    pub fn max_pb(mut self, value: f64) -> Self {
        self.filters.max_pb = value;
        self
    }

    #[must_use]
    pub fn min_pb(mut self, value: f64) -> Self {
        self.filters.min_pb = value;
        self
    }

    #[must_use]
    pub fn max_debt_to_equity(mut self, value: f64) -> Self {
        self.filters.max_debt_to_equity = value;
        self
    }

    #[must_use]
    pub fn min_score(mut self, value: f64) -> Self {
        self.filters.min_score = value;
        self
    }

    #[must_use]
    pub fn exclude_strategies(mut self, labels: Vec<String>) -> Self {
        self.filters.exclude_strategies = labels;
        self
    }

    #[must_use]
    pub fn save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    #[must_use]
    pub fn kind(&self) -> AssetType {
        self.asset_type
    }

    #[must_use]
    pub fn filters(&self) -> &ScreenFilters {
        &self.filters
    }

    /// Whether one asset survives every filter.
    #[must_use]
    pub fn accepts<T: Ranked + ?Sized>(&self, asset: &T) -> bool {
        let f = &self.filters;
        if asset.liquidity() < f.min_liquidity || asset.dividend_yield() < f.min_yield {
            return false;
        }
        if asset.pb() > f.max_pb || asset.pb() < f.min_pb {
            return false;
        }
        if self.asset_type == AssetType::Stock
            && asset.debt_to_equity().unwrap_or(0.0) > f.max_debt_to_equity
        {
            return false;
        }
        if asset.score() < f.min_score {
            return false;
        }
        let excluded = |label: &str| f.exclude_strategies.iter().any(|e| e == label);
        !(asset.strategy_labels().into_iter().any(excluded)
            || asset.category_label().is_some_and(excluded))
    }

    /// Keep the assets that survive every filter, in input order.
    #[must_use]
    pub fn apply<'a, T: Ranked>(&self, assets: &'a [T]) -> Vec<&'a T> {
        assets.iter().filter(|asset| self.accepts(*asset)).collect()
    }

    /// Run the screened class through the reconciler, filter, and
    /// optionally save a dated history file.
    pub async fn run(
        &self,
        reconciler: &Reconciler,
        history: &HistoryStore,
    ) -> Result<ScreenResult> {
        info!(asset_type = %self.asset_type, "Starting screener");

        let mut screening = match self.asset_type {
            AssetType::Stock => reconciler.run_scoped(AssetScope::Stocks).await,
            AssetType::Fii => reconciler.run_scoped(AssetScope::Funds).await,
        };
        let processed = screening.stocks.len() + screening.funds.len();

        screening.stocks.retain(|s| self.accepts(s));
        screening.funds.retain(|f| self.accepts(f));
        let result = ScreenResult {
            asset_type: self.asset_type,
            screening,
        };
        info!(processed, kept = result.len(), "Filters applied");

        if self.save {
            let economy = Some(result.screening.economy);
            let kind = self.asset_type.as_str();
            match self.asset_type {
                AssetType::Stock => {
                    history.save_results(&result.screening.stocks, kind, economy, Utc::now())?
                }
                AssetType::Fii => {
                    history.save_results(&result.screening.funds, kind, economy, Utc::now())?
                }
            };
        }

        Ok(result)
    }
}
