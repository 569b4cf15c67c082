//! Bulk discovery ports.

use async_trait::async_trait;

use crate::domain::{RawFundRecord, RawStockRecord};
use crate::error::Result;

/// Source of every listed stock's fundamentals.
#[async_trait]
pub trait StockSource: Send + Sync {
    /// Fetch all stocks. An empty list is a valid answer.
    async fn fetch_stocks(&self) -> Result<Vec<RawStockRecord>>;

    /// Source name for logging.
    fn source_name(&self) -> &'static str;
}

/// Source of listed fund fundamentals.
#[async_trait]
pub trait FundSource: Send + Sync {
    /// Fetch all funds this source lists.
    async fn fetch_funds(&self) -> Result<Vec<RawFundRecord>>;

    /// Source name for logging.
    fn source_name(&self) -> &'static str;
}
