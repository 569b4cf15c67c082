//! Classification and scoring engine.
//!
//! Everything here is pure and deterministic: the same record, enrichment
//! and rate always produce the same scored value. Network and file I/O live
//! in [`crate::adapter`] and [`crate::app`].
//!
//! - [`score_stock`] tags, scores and categorizes a listed equity
//! - [`score_fund`] classifies a fund into one [`FundType`](crate::domain::FundType) and scores it
//! - [`rank`] holds the post-scoring filter and the sort orders

pub mod fund;
pub mod rank;
mod stock;
pub mod text;

pub use fund::{classify_fund, score_fund};
pub use stock::{payout_adjustment, score_stock, PEG_NOT_APPLICABLE};

use crate::domain::NO_MAGIC_NUMBER;

/// Shares whose monthly distributions buy one more share in a year, and
/// what that position costs.
///
/// Assumes level monthly payouts. A non-paying asset gets the
/// [`NO_MAGIC_NUMBER`] sentinel.
#[must_use]
pub fn magic_numbers(dividend_yield: f64, price: f64) -> (u32, f64) {
    let number = if dividend_yield > 0.0 {
        // Saturating float-to-int cast.
        (1200.0 / dividend_yield).ceil() as u32
    } else {
        NO_MAGIC_NUMBER
    };
    (number, f64::from(number) * price)
}
