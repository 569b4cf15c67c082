//! Trait definitions for the screener's collaborators. Depend only on domain.
//!
//! Adapters in [`crate::adapter`] implement these against the public web
//! sources; [`crate::testkit`] implements them in memory.
//!
//! # Available Ports
//!
//! - [`StockSource`], [`FundSource`] - bulk discovery of raw records
//! - [`MetadataSource`] - authoritative per-ticker enrichment
//! - [`DividendHistorySource`] - full distribution history for one ticker
//! - [`EconomySource`] - benchmark rate and dollar quote
//! - [`TreasurySource`] - government bond offers

mod metadata;
mod rates;
mod source;

pub use metadata::{DividendHistorySource, MetadataSource};
pub use rates::{EconomySource, TreasurySource};
pub use source::{FundSource, StockSource};
