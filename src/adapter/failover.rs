//! Ordered stock source chain.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::RawStockRecord;
use crate::error::{Result, SourceError};
use crate::port::StockSource;

/// Tries each source in order; the first non-empty success wins.
pub struct FailoverStockSource {
    sources: Vec<Arc<dyn StockSource>>,
}

impl FailoverStockSource {
    pub fn new(sources: Vec<Arc<dyn StockSource>>) -> Self {
        Self { sources }
    }

    /// Primary source with a single fallback.
    pub fn pair(primary: Arc<dyn StockSource>, fallback: Arc<dyn StockSource>) -> Self {
        Self::new(vec![primary, fallback])
    }
}

#[async_trait]
impl StockSource for FailoverStockSource {
    async fn fetch_stocks(&self) -> Result<Vec<RawStockRecord>> {
        let mut last_error = None;

        for source in &self.sources {
            match source.fetch_stocks().await {
                Ok(stocks) if !stocks.is_empty() => {
                    info!(
                        source = source.source_name(),
                        count = stocks.len(),
                        "Stock source answered"
                    );
                    return Ok(stocks);
                }
                Ok(_) => warn!(
                    source = source.source_name(),
                    "Stock source returned nothing, trying next"
                ),
                Err(e) => {
                    warn!(
                        source = source.source_name(),
                        error = %e,
                        "Stock source failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SourceError::Empty {
                source_name: self.source_name(),
            }
            .into()
        }))
    }

    fn source_name(&self) -> &'static str {
        "failover"
    }
}
