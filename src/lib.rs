//! b3-screener - scores Brazilian stocks and listed funds.
//!
//! A run discovers every asset from bulk sources, keeps the candidates a
//! cheap first pass accepts, enriches them per ticker from a slower
//! authoritative source, and scores them again against a single benchmark
//! rate. Results become a static dashboard snapshot, dated history files or
//! a spreadsheet.
//!
//! # Modules
//!
//! - [`domain`] - Raw records, scored assets, strategy tags. No I/O.
//! - [`scoring`] - Pure scoring, classification and ranking rules
//! - [`port`] - Traits for every data source
//! - [`adapter`] - Web source implementations and the CLI
//! - [`app`] - Configuration, reconciliation and persistence
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use b3_screener::app::{Config, Sources};
//!
//! # async fn demo() -> b3_screener::error::Result<()> {
//! let config = Config::load_or_default(None)?;
//! let sources = Sources::from_config(&config)?;
//! let screening = sources.reconciler(&config).run().await;
//! println!("{} stocks, {} funds", screening.stocks.len(), screening.funds.len());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod domain;
pub mod error;
pub mod port;
pub mod scoring;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
