//! Listed asset identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exchange ticker symbol (e.g. `PETR4`, `HGLG11`).
///
/// Always stored trimmed and upper-cased so tickers coming from different
/// sources compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Create a new `Ticker`, normalizing case and whitespace.
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self(symbol.as_ref().trim().to_uppercase())
    }

    /// Get the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the ticker follows the fund/unit convention (`XXXX11`).
    #[must_use]
    pub fn is_fund(&self) -> bool {
        self.0.ends_with("11")
    }

    /// Whether the symbol is blank after normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(Ticker::new(" hglg11 ").as_str(), "HGLG11");
        assert_eq!(Ticker::from("petr4"), Ticker::from("PETR4"));
    }

    #[test]
    fn fund_convention() {
        assert!(Ticker::from("KNRI11").is_fund());
        assert!(!Ticker::from("PETR4").is_fund());
    }

    #[test]
    fn deserializes_normalized() {
        let ticker: Ticker = serde_json::from_str("\" mxrf11\"").unwrap();
        assert_eq!(ticker.as_str(), "MXRF11");
    }
}
