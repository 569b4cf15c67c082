//! Scored assets and the ranking view shared by stocks and funds.

use serde::Serialize;

use super::{
    DisplayCategory, EnrichmentRecord, FundStrategy, FundType, RawFundRecord, RawStockRecord,
    StockStrategy, StrategySet, Ticker,
};

/// Magic number reported when an asset pays nothing.
pub const NO_MAGIC_NUMBER: u32 = 9999;

/// Distribution details copied from the metadata source for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DividendInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_dividend: Option<f64>,
    #[serde(rename = "data_com", skip_serializing_if = "Option::is_none")]
    pub ex_date: Option<String>,
    #[serde(rename = "data_pagamento", skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
}

impl DividendInfo {
    /// Distribution details from an enrichment record, if it carries any.
    #[must_use]
    pub fn from_enrichment(record: &EnrichmentRecord) -> Option<Self> {
        let info = Self {
            last_dividend: record.last_dividend,
            ex_date: record.ex_date.clone(),
            payment_date: record.payment_date.clone(),
        };
        (info != Self::default()).then_some(info)
    }
}

/// A stock after scoring. Re-scoring produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredStock {
    #[serde(flatten)]
    pub raw: RawStockRecord,
    #[serde(rename = "graham_price")]
    pub graham_fair_price: f64,
    /// Graham upside, percent.
    pub upside: f64,
    pub bazin_price: f64,
    pub bazin_upside: f64,
    /// `999.0` when not applicable.
    pub peg_ratio: f64,
    /// Benchmark rate the score was computed against.
    pub selic: f64,
    pub score: f64,
    pub strategies: StrategySet<StockStrategy>,
    pub category: Option<DisplayCategory>,
    #[serde(rename = "magicNumber")]
    pub magic_number: u32,
    #[serde(rename = "magicCost")]
    pub magic_cost: f64,
    #[serde(flatten)]
    pub dividend: Option<DividendInfo>,
}

/// A fund after classification and scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFund {
    #[serde(flatten)]
    pub raw: RawFundRecord,
    #[serde(rename = "type")]
    pub fund_type: FundType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate: Option<String>,
    pub selic: f64,
    pub score: f64,
    pub strategies: StrategySet<FundStrategy>,
    pub category: DisplayCategory,
    #[serde(rename = "magicNumber")]
    pub magic_number: u32,
    #[serde(rename = "magicCost")]
    pub magic_cost: f64,
    /// Whether authoritative metadata contributed to this result.
    pub enriched: bool,
    #[serde(flatten)]
    pub dividend: Option<DividendInfo>,
}

/// Read-only view used for sorting, filtering and console output.
pub trait Ranked {
    fn ticker(&self) -> &Ticker;
    fn score(&self) -> f64;
    fn price(&self) -> f64;
    fn dividend_yield(&self) -> f64;
    fn liquidity(&self) -> f64;
    fn pb(&self) -> f64;
    /// Leverage, when the asset class reports it.
    fn debt_to_equity(&self) -> Option<f64>;
    fn strategy_labels(&self) -> Vec<&'static str>;
    fn category_label(&self) -> Option<&'static str>;
    /// Asset class or fund type label.
    fn kind_label(&self) -> &'static str;
    fn magic_number(&self) -> u32;
}

impl Ranked for ScoredStock {
    fn ticker(&self) -> &Ticker {
        &self.raw.ticker
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn price(&self) -> f64 {
        self.raw.price
    }

    fn dividend_yield(&self) -> f64 {
        self.raw.dividend_yield
    }

    fn liquidity(&self) -> f64 {
        self.raw.liquidity_2m
    }

    fn pb(&self) -> f64 {
        self.raw.pb
    }

    fn debt_to_equity(&self) -> Option<f64> {
        Some(self.raw.debt_to_equity)
    }

    fn strategy_labels(&self) -> Vec<&'static str> {
        self.strategies.labels()
    }

    fn category_label(&self) -> Option<&'static str> {
        self.category.map(DisplayCategory::as_str)
    }

    fn kind_label(&self) -> &'static str {
        "STOCK"
    }

    fn magic_number(&self) -> u32 {
        self.magic_number
    }
}

impl Ranked for ScoredFund {
    fn ticker(&self) -> &Ticker {
        &self.raw.ticker
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn price(&self) -> f64 {
        self.raw.price
    }

    fn dividend_yield(&self) -> f64 {
        self.raw.dividend_yield
    }

    fn liquidity(&self) -> f64 {
        self.raw.liquidity
    }

    fn pb(&self) -> f64 {
        self.raw.pb
    }

    fn debt_to_equity(&self) -> Option<f64> {
        None
    }

    fn strategy_labels(&self) -> Vec<&'static str> {
        self.strategies.labels()
    }

    fn category_label(&self) -> Option<&'static str> {
        Some(self.category.as_str())
    }

    fn kind_label(&self) -> &'static str {
        self.fund_type.as_str()
    }

    fn magic_number(&self) -> u32 {
        self.magic_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dividend_info_absent_for_empty_enrichment() {
        assert!(DividendInfo::from_enrichment(&EnrichmentRecord::empty("HGLG11")).is_none());

        let record = EnrichmentRecord {
            last_dividend: Some(1.10),
            ex_date: Some("30/09/2025".into()),
            ..EnrichmentRecord::empty("HGLG11")
        };
        let info = DividendInfo::from_enrichment(&record).unwrap();
        assert_eq!(info.last_dividend, Some(1.10));
        assert!(info.payment_date.is_none());
    }
}
