//! Post-scoring filter and sort orders.

use std::cmp::Ordering;

use crate::domain::{DisplayCategory, Ranked, ScoredFund, ScoredStock};

/// Minimum score for an untagged asset to survive the final pass.
pub const FINAL_MIN_SCORE: f64 = 5.5;

/// Keep an asset that matched at least one strategy or scored well enough.
pub fn passes_filter<T: Ranked + ?Sized>(asset: &T, min_score: f64) -> bool {
    !asset.strategy_labels().is_empty() || asset.score() >= min_score
}

/// Score descending, then dividend yield descending.
pub fn compare_by_score<T: Ranked + ?Sized>(a: &T, b: &T) -> Ordering {
    b.score()
        .total_cmp(&a.score())
        .then_with(|| b.dividend_yield().total_cmp(&a.dividend_yield()))
}

pub fn sort_funds(funds: &mut [ScoredFund]) {
    funds.sort_by(compare_by_score);
}

/// STAR before OPPORTUNITY, then score and yield.
pub fn sort_stocks(stocks: &mut [ScoredStock]) {
    stocks.sort_by(|a, b| {
        category_rank(a.category)
            .cmp(&category_rank(b.category))
            .then_with(|| compare_by_score(a, b))
    });
}

fn category_rank(category: Option<DisplayCategory>) -> u8 {
    match category {
        Some(DisplayCategory::Star) => 0,
        Some(DisplayCategory::Opportunity) => 1,
        Some(DisplayCategory::Standard) => 2,
        None => 3,
    }
}

/// Liquidity gates applied to scored stocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockSelection {
    /// Two-month liquidity every listed stock must exceed.
    pub min_liquidity: f64,
    /// Liquidity a STAR must exceed; stars below it are dropped.
    pub star_min_liquidity: f64,
}

impl Default for StockSelection {
    fn default() -> Self {
        Self {
            min_liquidity: 200_000.0,
            star_min_liquidity: 300_000.0,
        }
    }
}

impl StockSelection {
    /// Whether a raw two-month liquidity clears the discovery floor.
    #[must_use]
    pub fn is_liquid(&self, liquidity: f64) -> bool {
        liquidity > self.min_liquidity
    }

    /// Drop illiquid and uncategorized stocks, then sort.
    #[must_use]
    pub fn select(&self, stocks: Vec<ScoredStock>) -> Vec<ScoredStock> {
        let mut selected: Vec<ScoredStock> = stocks
            .into_iter()
            .filter(|s| self.is_liquid(s.raw.liquidity_2m))
            .filter(|s| match s.category {
                Some(DisplayCategory::Star) => s.raw.liquidity_2m > self.star_min_liquidity,
                Some(DisplayCategory::Opportunity) => true,
                Some(DisplayCategory::Standard) | None => false,
            })
            .collect();
        sort_stocks(&mut selected);
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BenchmarkRate, RawFundRecord, RawStockRecord};
    use crate::scoring::{score_fund, score_stock};

    fn star_stock(ticker: &str, liquidity: f64) -> ScoredStock {
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
            liquidity_2m: liquidity,
            dividend_yield: 8.0,
            ..RawStockRecord::new(ticker)
        };
        score_stock(&raw, BenchmarkRate::new(10.0))
    }

    fn opportunity_stock(ticker: &str, dy: f64) -> ScoredStock {
        let raw = RawStockRecord {
            price: 10.0,
            pe: 8.0,
            roe: 6.0,
            debt_to_equity: 2.0,
            liquidity_2m: 500_000.0,
            dividend_yield: dy,
            ..RawStockRecord::new(ticker)
        };
        score_stock(&raw, BenchmarkRate::new(10.0))
    }

    #[test]
    fn test_stars_sort_before_opportunities() {
        let mut stocks = vec![
            opportunity_stock("OPPA3", 3.0),
            star_stock("STAR3", 2_000_000.0),
        ];
        sort_stocks(&mut stocks);
        assert_eq!(stocks[0].raw.ticker.as_str(), "STAR3");
    }

    #[test]
    fn test_yield_breaks_score_ties() {
        let mut stocks = vec![opportunity_stock("LOWY3", 1.0), opportunity_stock("HIGH3", 3.0)];
        assert_eq!(stocks[0].score, stocks[1].score);
        sort_stocks(&mut stocks);
        assert_eq!(stocks[0].raw.ticker.as_str(), "HIGH3");
    }

    #[test]
    fn test_thin_star_is_dropped_not_demoted() {
        let selection = StockSelection::default();
        let stocks = vec![
            star_stock("THIN3", 250_000.0),
            star_stock("DEEP3", 2_000_000.0),
            star_stock("DUST3", 100_000.0),
        ];
        let selected = selection.select(stocks);
        let tickers: Vec<_> = selected.iter().map(|s| s.raw.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["DEEP3"]);
    }

    #[test]
    fn test_fund_filter_and_sort() {
        let rate = BenchmarkRate::new(12.0);
        let fund = |ticker: &str, dy: f64, liquidity: f64| {
            let raw = RawFundRecord {
                segment: "Lajes Corporativas".into(),
                price: 100.0,
                pb: 1.0,
                dividend_yield: dy,
                liquidity,
                market_cap: 1_500_000_000.0,
                vacancy: 10.0,
                ..RawFundRecord::new(ticker)
            };
            score_fund(&raw, None, rate)
        };

        let mut funds = vec![
            fund("AAAA11", 9.0, 2_000_000.0),
            fund("BBBB11", 11.0, 2_000_000.0),
            fund("CCCC11", 4.0, 100_000.0),
        ];
        funds.retain(|f| passes_filter(f, FINAL_MIN_SCORE));
        sort_funds(&mut funds);

        let tickers: Vec<_> = funds.iter().map(|f| f.raw.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["BBBB11", "AAAA11"]);
    }
}
