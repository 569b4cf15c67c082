//! Macro indicators and fixed income offers.

use async_trait::async_trait;

use crate::domain::TreasuryBond;
use crate::error::Result;

/// Benchmark rate and currency quote.
#[async_trait]
pub trait EconomySource: Send + Sync {
    /// Current Selic target in percent.
    async fn selic(&self) -> Result<f64>;

    /// USD/BRL bid.
    async fn dollar(&self) -> Result<f64>;

    fn source_name(&self) -> &'static str;
}

/// Government bond offers.
#[async_trait]
pub trait TreasurySource: Send + Sync {
    async fn fetch_bonds(&self) -> Result<Vec<TreasuryBond>>;

    fn source_name(&self) -> &'static str;
}
