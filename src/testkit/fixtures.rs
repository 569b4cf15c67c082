//! Raw records for typical stocks and funds.

use crate::domain::{RawFundRecord, RawStockRecord};

/// Profitable, cheap, liquid and growing: scores high and is a STAR.
#[must_use]
pub fn star_stock(ticker: &str) -> RawStockRecord {
    RawStockRecord {
        price: 30.0,
        pe: 5.0,
        pb: 0.8,
        psr: 1.0,
        ev_ebit: 4.0,
        ebit_margin: 25.0,
        net_margin: 20.0,
        roe: 20.0,
        roic: 20.0,
        revenue_cagr_5y: 20.0,
        debt_to_equity: 0.5,
        liquidity_2m: 5_000_000.0,
        dividend_yield: 8.0,
        payout: Some(40.0),
        ..RawStockRecord::new(ticker)
    }
}

/// Loss-making and indebted; never selected.
#[must_use]
pub fn weak_stock(ticker: &str) -> RawStockRecord {
    RawStockRecord {
        price: 4.0,
        pe: -3.0,
        pb: 2.5,
        ebit_margin: -8.0,
        net_margin: -12.0,
        roe: -15.0,
        debt_to_equity: 4.0,
        revenue_cagr_5y: -10.0,
        liquidity_2m: 1_000_000.0,
        ..RawStockRecord::new(ticker)
    }
}

/// Liquid stock below the discovery liquidity floor.
#[must_use]
pub fn illiquid_stock(ticker: &str) -> RawStockRecord {
    RawStockRecord {
        liquidity_2m: 50_000.0,
        ..star_stock(ticker)
    }
}

/// Large logistics fund at a discount: TIJOLO_VALUE.
#[must_use]
pub fn brick_fund(ticker: &str) -> RawFundRecord {
    RawFundRecord {
        segment: "Logística".into(),
        price: 150.0,
        ffo_yield: 9.0,
        dividend_yield: 9.5,
        pb: 0.85,
        market_cap: 3_000_000_000.0,
        liquidity: 4_000_000.0,
        property_count: 20.0,
        cap_rate: 9.0,
        vacancy: 3.0,
        ..RawFundRecord::new(ticker)
    }
}

/// Receivables fund near par with a high yield: PAPEL_CARRY.
#[must_use]
pub fn paper_fund(ticker: &str) -> RawFundRecord {
    RawFundRecord {
        segment: "Títulos e Val. Mob.".into(),
        price: 9.8,
        dividend_yield: 13.0,
        pb: 1.0,
        market_cap: 2_000_000_000.0,
        liquidity: 6_000_000.0,
        ..RawFundRecord::new(ticker)
    }
}

/// Ticker-only record from a listing page, before enrichment.
#[must_use]
pub fn listing_fund(ticker: &str, segment: &str) -> RawFundRecord {
    RawFundRecord {
        segment: segment.into(),
        ..RawFundRecord::new(ticker)
    }
}
