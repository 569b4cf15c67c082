//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`sources`] - In-memory port implementations: static discovery
//!   sources, a failing source, scripted metadata with delays and failures.
//! - [`fixtures`] - Raw record builders for typical stocks and funds.

pub mod fixtures;
pub mod sources;

pub use sources::{
    FailingSource, ScriptedMetadata, StaticEconomy, StaticFunds, StaticHistory, StaticStocks,
};
