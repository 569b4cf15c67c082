//! Stock strategy tagging, scoring and categorization.

use super::magic_numbers;
use crate::domain::{
    BenchmarkRate, DisplayCategory, RawStockRecord, ScoredStock, StockStrategy, StrategySet,
};

/// PEG reported when P/E or growth is not positive.
pub const PEG_NOT_APPLICABLE: f64 = 999.0;
/// Yield above which a stock is tagged as volatile and scored as if capped.
const YIELD_CAP: f64 = 16.0;

/// Score one stock against the benchmark rate.
///
/// Total: non-finite inputs are treated as zero and every ratio guards its
/// denominator. The score is capped at 10 but may be negative.
pub fn score_stock(raw: &RawStockRecord, rate: BenchmarkRate) -> ScoredStock {
    let s = raw.sanitized();
    let threshold = rate.yield_threshold();

    let graham_fair_price = if s.pe > 0.0 && s.pb > 0.0 {
        s.price * (22.5 / (s.pe * s.pb)).sqrt()
    } else {
        0.0
    };
    let upside = upside_percent(graham_fair_price, s.price);

    let bazin_price = if s.dividend_yield > 0.0 && s.price > 0.0 {
        (s.dividend_yield / 100.0 * s.price) / (threshold / 100.0)
    } else {
        0.0
    };
    let bazin_upside = upside_percent(bazin_price, s.price);

    let peg_ratio = if s.pe > 0.0 && s.revenue_cagr_5y > 0.0 {
        s.pe / s.revenue_cagr_5y
    } else {
        PEG_NOT_APPLICABLE
    };

    // Utilities and insurers: stable margins tolerate a higher payout.
    let perennial = s.net_margin > 15.0 && s.roe > 12.0;
    let max_payout = if perennial { 100.0 } else { 90.0 };
    let payout = s.payout_or_zero();

    let turnaround = s.pe < 0.0 && s.ebit_margin > 0.0 && s.price > 2.0;

    let mut strategies = StrategySet::new();
    if s.net_margin > 10.0
        && s.debt_to_equity < 1.0
        && s.revenue_cagr_5y > 5.0
        && ((s.roe > 15.0 && s.roic > 10.0) || (s.roe > 12.0 && s.roic > 15.0))
    {
        strategies.insert(StockStrategy::Quality);
    }
    if s.dividend_yield > threshold
        && s.net_margin > 10.0
        && s.revenue_cagr_5y > 0.0
        && (payout <= 0.0 || payout <= max_payout)
    {
        strategies.insert(StockStrategy::Dividend);
    }
    if s.pe > 0.0 && s.pe < 10.0 && s.pb > 0.0 && s.pb < 1.0 {
        strategies.insert(StockStrategy::Value);
    }
    if s.revenue_cagr_5y > 15.0 && s.roe > 10.0 {
        strategies.insert(StockStrategy::Growth);
    }
    if s.roic > 15.0 && s.ev_ebit > 0.0 && s.ev_ebit < 10.0 {
        strategies.insert(StockStrategy::Magic);
    }
    if s.dividend_yield > 6.0
        && s.debt_to_equity < 1.0
        && s.liquidity_2m > 100_000.0
        && s.revenue_cagr_5y > -5.0
    {
        strategies.insert(StockStrategy::Bazin);
    }
    if turnaround {
        strategies.insert(StockStrategy::Turnaround);
    }
    if s.dividend_yield > YIELD_CAP {
        strategies.insert(StockStrategy::HighVolatility);
    }

    let mut score = 0.0;

    // Valuation
    if s.pe > 0.0 && s.pe < 10.0 {
        score += 1.0;
    }
    if s.pb > 0.0 && s.pb < 1.0 {
        score += 1.0;
    }
    if s.ev_ebit > 0.0 && s.ev_ebit < 8.0 {
        score += 1.0;
    }
    if s.psr > 0.0 && s.psr < 2.0 {
        score += 1.0;
    }

    // Profitability
    if s.roe > 15.0 {
        score += 2.0;
    } else if s.roe > 10.0 {
        score += 1.0;
    }
    if s.roic > 15.0 {
        score += 1.0;
    }
    if s.net_margin > 10.0 {
        score += 1.0;
    }

    // Growth
    if peg_ratio < 0.5 {
        score += 2.0;
    } else if peg_ratio < 1.0 {
        score += 1.0;
    }
    if s.dividend_yield.min(YIELD_CAP) > threshold {
        score += 1.0;
    }
    if s.revenue_cagr_5y < 0.0 {
        score -= 3.0;
    }

    // Health
    if s.debt_to_equity < 1.0 {
        score += 1.0;
    }
    if s.liquidity_2m > 1_000_000.0 {
        score += 1.0;
    }
    if upside > 25.0 || bazin_upside > 20.0 {
        score += 1.0;
    }

    score += payout_adjustment(payout, perennial);
    let score = f64::min(score, 10.0);

    // Turnaround is left out of the three-tag bar; a high score still makes STAR.
    let qualifying_tags = strategies.len() - usize::from(turnaround);
    let unsustainable_payout = payout > 100.0;

    let category = if (score >= 7.0 || qualifying_tags >= 3) && !unsustainable_payout {
        Some(DisplayCategory::Star)
    } else if s.pe > 0.0
        && s.debt_to_equity < 2.5
        && (s.roe > 5.0 || s.dividend_yield > 4.0)
        && (s.pb < 0.95 || s.pe < 9.0 || s.ev_ebit < 10.0)
    {
        Some(DisplayCategory::Opportunity)
    } else if turnaround {
        Some(DisplayCategory::Opportunity)
    } else {
        None
    };

    let (magic_number, magic_cost) = magic_numbers(s.dividend_yield, s.price);

    ScoredStock {
        graham_fair_price,
        upside,
        bazin_price,
        bazin_upside,
        peg_ratio,
        selic: rate.value(),
        score,
        strategies,
        category,
        magic_number,
        magic_cost,
        dividend: None,
        raw: s,
    }
}

/// Payout sustainability term. Zero when the payout is unknown.
pub fn payout_adjustment(payout: f64, perennial: bool) -> f64 {
    if payout <= 0.0 {
        0.0
    } else if (30.0..=60.0).contains(&payout) {
        2.0
    } else if payout > 60.0 && payout <= 80.0 {
        1.0
    } else if payout > 150.0 {
        -5.0
    } else if payout > 100.0 {
        -4.0
    } else if payout > 90.0 {
        -2.0
    } else if payout > 80.0 && !perennial {
        -1.0
    } else {
        0.0
    }
}

fn upside_percent(target: f64, price: f64) -> f64 {
    if target > 0.0 && price > 0.0 {
        (target - price) / price * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(value: f64) -> BenchmarkRate {
        BenchmarkRate::new(value)
    }

    fn scenario_stock() -> RawStockRecord {
        RawStockRecord {
            price: 20.0,
            pe: 10.0,
            pb: 1.0,
            dividend_yield: 5.0,
            ..RawStockRecord::new("TEST3")
        }
    }

    #[test]
    fn test_graham_fair_value() {
        let stock = score_stock(&scenario_stock(), rate(10.0));
        assert!((stock.graham_fair_price - 30.0).abs() < 1e-9);
        assert!((stock.upside - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_bazin_ceiling_uses_floor_threshold() {
        let stock = score_stock(&scenario_stock(), rate(10.0));
        assert!((stock.bazin_price - 16.666_666).abs() < 1e-3);
        assert!(stock.bazin_upside < 0.0);
    }

    #[test]
    fn test_graham_zero_without_positive_multiples() {
        let raw = RawStockRecord {
            pe: -4.0,
            ..scenario_stock()
        };
        let stock = score_stock(&raw, rate(10.0));
        assert_eq!(stock.graham_fair_price, 0.0);
        assert_eq!(stock.upside, 0.0);
    }

    #[test]
    fn test_payout_above_150_penalized_and_vetoes_star() {
        let raw = RawStockRecord {
            price: 30.0,
            pe: 5.0,
            pb: 0.8,
            psr: 1.0,
            ev_ebit: 4.0,
            roe: 20.0,
            roic: 20.0,
            net_margin: 20.0,
            revenue_cagr_5y: 20.0,
            debt_to_equity: 0.5,
            liquidity_2m: 5_000_000.0,
            dividend_yield: 12.0,
            payout: Some(160.0),
            ..RawStockRecord::new("TEST3")
        };
        let stock = score_stock(&raw, rate(10.0));

        assert_eq!(payout_adjustment(160.0, true), -5.0);
        assert!(stock.strategies.len() >= 3);
        assert_ne!(stock.category, Some(DisplayCategory::Star));

        let sustainable = RawStockRecord {
            payout: Some(50.0),
            ..raw
        };
        let stock = score_stock(&sustainable, rate(10.0));
        assert_eq!(stock.category, Some(DisplayCategory::Star));
        assert_eq!(stock.score, 10.0);
    }

    #[test]
    fn test_perennial_relaxes_payout_ceiling() {
        let raw = RawStockRecord {
            price: 40.0,
            dividend_yield: 9.0,
            net_margin: 20.0,
            roe: 18.0,
            revenue_cagr_5y: 3.0,
            payout: Some(95.0),
            ..RawStockRecord::new("TAEE11")
        };
        let stock = score_stock(&raw, rate(12.0));
        assert!(stock.strategies.contains(StockStrategy::Dividend));

        let not_perennial = RawStockRecord {
            net_margin: 12.0,
            ..raw
        };
        let stock = score_stock(&not_perennial, rate(12.0));
        assert!(!stock.strategies.contains(StockStrategy::Dividend));
    }

    #[test]
    fn test_high_yield_capped_and_tagged() {
        let raw = RawStockRecord {
            price: 10.0,
            dividend_yield: 25.0,
            ..RawStockRecord::new("TEST3")
        };
        let stock = score_stock(&raw, rate(10.0));
        assert!(stock.strategies.contains(StockStrategy::HighVolatility));
        assert_eq!(stock.raw.dividend_yield, 25.0);
    }

    #[test]
    fn test_low_scoring_turnaround_is_opportunity() {
        let raw = RawStockRecord {
            price: 5.0,
            pe: -3.0,
            ebit_margin: 4.0,
            ..RawStockRecord::new("TURN3")
        };
        let stock = score_stock(&raw, rate(10.0));
        assert!(stock.strategies.contains(StockStrategy::Turnaround));
        assert_eq!(stock.category, Some(DisplayCategory::Opportunity));
    }

    #[test]
    fn test_turnaround_not_counted_toward_star() {
        // Two qualifying tags plus turnaround stays below the three-tag bar.
        let raw = RawStockRecord {
            price: 5.0,
            pe: -3.0,
            ebit_margin: 4.0,
            roic: 20.0,
            ev_ebit: 5.0,
            revenue_cagr_5y: 20.0,
            roe: 11.0,
            debt_to_equity: 3.0,
            ..RawStockRecord::new("TURN3")
        };
        let stock = score_stock(&raw, rate(10.0));
        assert_eq!(stock.strategies.len(), 3);
        assert!(stock.score < 7.0);
        assert_eq!(stock.category, Some(DisplayCategory::Opportunity));
    }

    #[test]
    fn test_peg_sentinel_and_negative_growth_penalty() {
        let raw = RawStockRecord {
            pe: 8.0,
            revenue_cagr_5y: -10.0,
            debt_to_equity: 3.0,
            ..RawStockRecord::new("SHRK3")
        };
        let stock = score_stock(&raw, rate(10.0));
        assert_eq!(stock.peg_ratio, PEG_NOT_APPLICABLE);
        // +1 for P/E, -3 for shrinking revenue
        assert_eq!(stock.score, -2.0);
        assert_eq!(stock.category, None);
    }

    #[test]
    fn test_all_zero_record_is_total() {
        let stock = score_stock(&RawStockRecord::new("ZERO3"), rate(f64::NAN));
        assert_eq!(stock.selic, BenchmarkRate::FALLBACK);
        assert!(stock.score.is_finite());
        assert_eq!(stock.magic_number, 9999);
        assert_eq!(stock.magic_cost, 0.0);
    }

    #[test]
    fn test_display_order_is_declaration_order() {
        let raw = RawStockRecord {
            price: 5.0,
            pe: -3.0,
            ebit_margin: 4.0,
            dividend_yield: 20.0,
            ..RawStockRecord::new("TEST3")
        };
        let stock = score_stock(&raw, rate(10.0));
        assert_eq!(stock.strategies.labels(), vec!["TURNAROUND", "HIGH_VOLATILITY"]);
    }
}
