//! Market records and value types. No I/O happens here.

mod asset;
mod enrichment;
mod fund;
mod market;
mod rate;
mod stock;
mod tag;
mod ticker;

pub use asset::{DividendInfo, Ranked, ScoredFund, ScoredStock, NO_MAGIC_NUMBER};
pub use enrichment::{EnrichmentRecord, Enrichments, ValuationSnapshot};
pub use fund::{FundType, RawFundRecord};
pub use market::{DividendEvent, Economy, Etf, PrivateBenchmark, TreasuryBond};
pub use rate::BenchmarkRate;
pub use stock::RawStockRecord;
pub use tag::{DisplayCategory, FundStrategy, StockStrategy, StrategyLabel, StrategySet};
pub use ticker::Ticker;

/// Replace NaN and infinities with zero.
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
