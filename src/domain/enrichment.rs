//! Authoritative per-ticker metadata gathered after discovery.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{finite_or_zero, Ticker};

/// Valuation numbers reported on the metadata page itself.
///
/// Zero means "not reported".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    pub price: f64,
    pub dividend_yield: f64,
    pub pb: f64,
    pub liquidity: f64,
    pub vacancy: f64,
}

impl ValuationSnapshot {
    fn sanitized(self) -> Self {
        Self {
            price: finite_or_zero(self.price),
            dividend_yield: finite_or_zero(self.dividend_yield),
            pb: finite_or_zero(self.pb),
            liquidity: finite_or_zero(self.liquidity),
            vacancy: finite_or_zero(self.vacancy),
        }
    }
}

/// Supplementary data for one ticker.
///
/// A failed or timed out fetch is represented by [`EnrichmentRecord::empty`],
/// never by a missing entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    pub ticker: Ticker,
    /// Fund type label as printed by the source ("FII DE TIJOLO", "FIAGRO", ...).
    pub fund_type: Option<String>,
    pub mandate: Option<String>,
    pub segment: Option<String>,
    /// Last distribution per share.
    pub last_dividend: Option<f64>,
    pub ex_date: Option<String>,
    pub payment_date: Option<String>,
    #[serde(default)]
    pub valuation: ValuationSnapshot,
}

impl EnrichmentRecord {
    /// Explicit "nothing known" record.
    pub fn empty(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Whether the record carries any information at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fund_type.is_none()
            && self.mandate.is_none()
            && self.segment.is_none()
            && self.last_dividend.is_none()
            && self.ex_date.is_none()
            && self.payment_date.is_none()
            && self.valuation == ValuationSnapshot::default()
    }

    /// Whether a metadata probe found enough to stop trying other paths.
    #[must_use]
    pub fn is_conclusive(&self) -> bool {
        self.fund_type.is_some() || self.valuation.price > 0.0 || self.ex_date.is_some()
    }

    /// Copy with non-finite numbers zeroed and blank labels dropped.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let label = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty() && *s != "-")
                .map(str::to_string)
        };
        Self {
            ticker: self.ticker.clone(),
            fund_type: label(&self.fund_type),
            mandate: label(&self.mandate),
            segment: label(&self.segment),
            last_dividend: self
                .last_dividend
                .filter(|v| v.is_finite() && *v > 0.0),
            ex_date: label(&self.ex_date),
            payment_date: label(&self.payment_date),
            valuation: self.valuation.sanitized(),
        }
    }
}

/// Ticker to enrichment mapping whose lookups never miss.
#[derive(Debug, Clone, Default)]
pub struct Enrichments {
    records: HashMap<Ticker, EnrichmentRecord>,
    empty: EnrichmentRecord,
}

impl Enrichments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `ticker`, or the shared empty record when nothing was fetched.
    #[must_use]
    pub fn get(&self, ticker: &Ticker) -> &EnrichmentRecord {
        self.records.get(ticker).unwrap_or(&self.empty)
    }

    /// Whether a record (possibly empty) was stored for the ticker.
    #[must_use]
    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.records.contains_key(ticker)
    }

    pub fn insert(&mut self, record: EnrichmentRecord) {
        self.records.insert(record.ticker.clone(), record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of stored records that carry information.
    #[must_use]
    pub fn informative(&self) -> usize {
        self.records.values().filter(|r| !r.is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnrichmentRecord> {
        self.records.values()
    }
}

impl FromIterator<EnrichmentRecord> for Enrichments {
    fn from_iter<I: IntoIterator<Item = EnrichmentRecord>>(iter: I) -> Self {
        let mut enrichments = Self::new();
        for record in iter {
            enrichments.insert(record);
        }
        enrichments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_never_misses() {
        let enrichments = Enrichments::new();
        let record = enrichments.get(&Ticker::from("XPML11"));
        assert!(record.is_empty());
    }

    #[test]
    fn empty_record_is_not_conclusive() {
        let record = EnrichmentRecord::empty("KNCR11");
        assert!(record.is_empty());
        assert!(!record.is_conclusive());

        let typed = EnrichmentRecord {
            fund_type: Some("FII DE PAPEL".into()),
            ..record
        };
        assert!(!typed.is_empty());
        assert!(typed.is_conclusive());
    }

    #[test]
    fn sanitized_drops_placeholder_labels() {
        let record = EnrichmentRecord {
            segment: Some(" - ".into()),
            mandate: Some("Renda".into()),
            last_dividend: Some(f64::NAN),
            ..EnrichmentRecord::empty("HGLG11")
        };
        let clean = record.sanitized();
        assert!(clean.segment.is_none());
        assert_eq!(clean.mandate.as_deref(), Some("Renda"));
        assert!(clean.last_dividend.is_none());
    }
}
