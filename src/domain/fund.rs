//! Listed fund (FII, Fiagro, FI-Infra) fundamentals and the fund type taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{finite_or_zero, Ticker};

/// One fund's fundamentals at fetch time.
///
/// `segment` is free text from whichever source discovered the fund; it is
/// only a classification hint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFundRecord {
    pub ticker: Ticker,
    #[serde(default)]
    pub segment: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub ffo_yield: f64,
    #[serde(rename = "dy", default)]
    pub dividend_yield: f64,
    #[serde(rename = "p_vp", default)]
    pub pb: f64,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub liquidity: f64,
    #[serde(rename = "num_properties", default)]
    pub property_count: f64,
    #[serde(default)]
    pub cap_rate: f64,
    #[serde(default)]
    pub vacancy: f64,
}

impl RawFundRecord {
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
            segment: self.segment.trim().to_string(),
            price: finite_or_zero(self.price),
            ffo_yield: finite_or_zero(self.ffo_yield),
            dividend_yield: finite_or_zero(self.dividend_yield),
            pb: finite_or_zero(self.pb),
            market_cap: finite_or_zero(self.market_cap),
            liquidity: finite_or_zero(self.liquidity),
            property_count: finite_or_zero(self.property_count),
            cap_rate: finite_or_zero(self.cap_rate),
            vacancy: finite_or_zero(self.vacancy),
        }
    }

    /// Fill every zero or blank field from another source's record.
    ///
    /// Fields already present on `self` are kept, so the first source to
    /// report a fund wins on conflicting values.
    pub fn fill_missing(&mut self, other: &RawFundRecord) {
        if self.segment.trim().is_empty() {
            self.segment = other.segment.clone();
        }

        let pairs = [
            (&mut self.price, other.price),
            (&mut self.ffo_yield, other.ffo_yield),
            (&mut self.dividend_yield, other.dividend_yield),
            (&mut self.pb, other.pb),
            (&mut self.market_cap, other.market_cap),
            (&mut self.liquidity, other.liquidity),
            (&mut self.property_count, other.property_count),
            (&mut self.cap_rate, other.cap_rate),
            (&mut self.vacancy, other.vacancy),
        ];
        for (field, value) in pairs {
            if *field == 0.0 && value.is_finite() {
                *field = value;
            }
        }
    }
}

/// Mutually exclusive fund type bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FundType {
    /// Infrastructure debentures (Law 12.431 funds).
    Infra,
    /// Agribusiness receivables and land (Fiagro).
    Agro,
    /// Hybrid or fund-of-funds mandate.
    Multi,
    /// Real-estate securities and receivables.
    Papel,
    /// Income-producing property ("brick").
    Tijolo,
    Outros,
}

impl FundType {
    /// All fund types in classification priority order.
    pub const ALL: [FundType; 6] = [
        FundType::Infra,
        FundType::Agro,
        FundType::Multi,
        FundType::Papel,
        FundType::Tijolo,
        FundType::Outros,
    ];

    /// Label used in snapshots and console output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Infra => "INFRA",
            Self::Agro => "AGRO",
            Self::Multi => "MULTI",
            Self::Papel => "PAPEL",
            Self::Tijolo => "TIJOLO",
            Self::Outros => "OUTROS",
        }
    }

    /// Whether the fund earns income from credit rather than property.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Papel | Self::Infra | Self::Agro)
    }
}

impl fmt::Display for FundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_missing_keeps_first_source_values() {
        let mut first = RawFundRecord {
            segment: "Logística".into(),
            price: 100.0,
            ..RawFundRecord::new("HGLG11")
        };
        let second = RawFundRecord {
            segment: "Outros".into(),
            price: 90.0,
            dividend_yield: 9.5,
            liquidity: 2_000_000.0,
            ..RawFundRecord::new("HGLG11")
        };

        first.fill_missing(&second);

        assert_eq!(first.segment, "Logística");
        assert_eq!(first.price, 100.0);
        assert_eq!(first.dividend_yield, 9.5);
        assert_eq!(first.liquidity, 2_000_000.0);
    }

    #[test]
    fn fund_type_serializes_uppercase() {
        let json = serde_json::to_string(&FundType::Tijolo).unwrap();
        assert_eq!(json, "\"TIJOLO\"");
        assert!(FundType::Agro.is_credit());
        assert!(!FundType::Multi.is_credit());
    }

    #[test]
    fn sanitized_trims_segment() {
        let raw = RawFundRecord {
            segment: "  Shoppings ".into(),
            vacancy: f64::NAN,
            ..RawFundRecord::new("VISC11")
        };
        let clean = raw.sanitized();
        assert_eq!(clean.segment, "Shoppings");
        assert_eq!(clean.vacancy, 0.0);
    }
}
