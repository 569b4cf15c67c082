//! Per-ticker lookups.

use async_trait::async_trait;

use crate::domain::{DividendEvent, EnrichmentRecord, Ticker};
use crate::error::Result;

/// Slower, authoritative per-ticker metadata.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch metadata for one ticker.
    ///
    /// Returns an empty record when the source has nothing; `Err` is reserved
    /// for transport failures.
    async fn fetch_metadata(&self, ticker: &Ticker) -> Result<EnrichmentRecord>;

    fn source_name(&self) -> &'static str;
}

/// Historical distributions for one ticker.
#[async_trait]
pub trait DividendHistorySource: Send + Sync {
    /// Newest first, as the source lists them.
    async fn fetch_history(&self, ticker: &Ticker) -> Result<Vec<DividendEvent>>;

    fn source_name(&self) -> &'static str;
}
