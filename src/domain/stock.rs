//! Listed equity fundamentals as produced by a stock source.

use serde::{Deserialize, Serialize};

use super::{finite_or_zero, Ticker};

/// One listed equity's fundamentals at fetch time.
///
/// Percent fields are in percent units (`12.5` means 12.5%). Sources default
/// any absent numeric field to `0`; the scorer never has to special-case a
/// missing value beyond "the field is zero". Field names on the wire are the
/// ones the dashboard has always consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStockRecord {
    pub ticker: Ticker,
    #[serde(rename = "cotacao", default)]
    pub price: f64,
    /// Price / earnings.
    #[serde(rename = "pl", default)]
    pub pe: f64,
    /// Price / book value.
    #[serde(rename = "p_vp", default)]
    pub pb: f64,
    /// Price / sales.
    #[serde(default)]
    pub psr: f64,
    #[serde(default)]
    pub dividend_yield: f64,
    #[serde(default)]
    pub ev_ebit: f64,
    #[serde(rename = "mrg_ebit", default)]
    pub ebit_margin: f64,
    #[serde(rename = "mrg_liq", default)]
    pub net_margin: f64,
    #[serde(default)]
    pub roic: f64,
    #[serde(default)]
    pub roe: f64,
    /// Average daily traded volume over the last two months.
    #[serde(rename = "liq_2meses", default)]
    pub liquidity_2m: f64,
    /// Gross debt / equity.
    #[serde(rename = "div_br_patrim", default)]
    pub debt_to_equity: f64,
    /// Five-year revenue CAGR.
    #[serde(rename = "cresc_5a", default)]
    pub revenue_cagr_5y: f64,
    /// Share of earnings distributed, when the source can derive it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout: Option<f64>,
}

impl RawStockRecord {
    /// Create an all-zero record for a ticker.
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Copy of the record with every non-finite number replaced by zero.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            ticker: self.ticker.clone(),
            price: finite_or_zero(self.price),
            pe: finite_or_zero(self.pe),
            pb: finite_or_zero(self.pb),
            psr: finite_or_zero(self.psr),
            dividend_yield: finite_or_zero(self.dividend_yield),
            ev_ebit: finite_or_zero(self.ev_ebit),
            ebit_margin: finite_or_zero(self.ebit_margin),
            net_margin: finite_or_zero(self.net_margin),
            roic: finite_or_zero(self.roic),
            roe: finite_or_zero(self.roe),
            liquidity_2m: finite_or_zero(self.liquidity_2m),
            debt_to_equity: finite_or_zero(self.debt_to_equity),
            revenue_cagr_5y: finite_or_zero(self.revenue_cagr_5y),
            payout: self.payout.map(finite_or_zero),
        }
    }

    /// Payout in percent, treating an unknown payout as zero.
    #[must_use]
    pub fn payout_or_zero(&self) -> f64 {
        self.payout.unwrap_or(0.0)
    }
}
