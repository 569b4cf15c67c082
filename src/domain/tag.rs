//! Strategy tags and display categories attached by the scorers.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A strategy tag with a stable wire label.
pub trait StrategyLabel: Copy + Eq + fmt::Debug {
    fn label(self) -> &'static str;
}

/// Stock strategy tags in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStrategy {
    Quality,
    Dividend,
    Value,
    Growth,
    Magic,
    Bazin,
    Turnaround,
    /// Cautionary: yield above 16%, likely non-recurring.
    HighVolatility,
}

impl StockStrategy {
    pub const ALL: [StockStrategy; 8] = [
        StockStrategy::Quality,
        StockStrategy::Dividend,
        StockStrategy::Value,
        StockStrategy::Growth,
        StockStrategy::Magic,
        StockStrategy::Bazin,
        StockStrategy::Turnaround,
        StockStrategy::HighVolatility,
    ];

    /// One-line rule summary used by `strategies`.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Quality => "net margin > 10, debt/equity < 1, growth > 5, strong ROE/ROIC",
            Self::Dividend => "yield above threshold, margin > 10, growing, payout sustainable",
            Self::Value => "0 < P/E < 10 and 0 < P/B < 1",
            Self::Growth => "5y revenue growth > 15 and ROE > 10",
            Self::Magic => "ROIC > 15 and 0 < EV/EBIT < 10",
            Self::Bazin => "yield > 6, debt/equity < 1, liquidity > 100k, growth > -5",
            Self::Turnaround => "negative P/E with positive EBIT margin, price > 2",
            Self::HighVolatility => "yield above 16% (cautionary)",
        }
    }
}

impl StrategyLabel for StockStrategy {
    fn label(self) -> &'static str {
        match self {
            Self::Quality => "QUALITY",
            Self::Dividend => "DIVIDEND",
            Self::Value => "VALUE",
            Self::Growth => "GROWTH",
            Self::Magic => "MAGIC",
            Self::Bazin => "BAZIN",
            Self::Turnaround => "TURNAROUND",
            Self::HighVolatility => "HIGH_VOLATILITY",
        }
    }
}

/// Fund strategy tags in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundStrategy {
    TijoloValue,
    PapelCarry,
    /// Cautionary: credit fund trading at a deep discount.
    DistressedRisk,
}

impl FundStrategy {
    pub const ALL: [FundStrategy; 3] = [
        FundStrategy::TijoloValue,
        FundStrategy::PapelCarry,
        FundStrategy::DistressedRisk,
    ];

    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::TijoloValue => "brick fund, P/B < 0.90, market cap > 1B",
            Self::PapelCarry => "credit fund, yield > 11, P/B >= 0.95",
            Self::DistressedRisk => "non-brick fund below 0.85 P/B (cautionary)",
        }
    }
}

impl StrategyLabel for FundStrategy {
    fn label(self) -> &'static str {
        match self {
            Self::TijoloValue => "TIJOLO_VALUE",
            Self::PapelCarry => "PAPEL_CARRY",
            Self::DistressedRisk => "DISTRESSED_RISK",
        }
    }
}

macro_rules! impl_display_via_label {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    )*};
}

impl_display_via_label!(StockStrategy, FundStrategy);

/// Ordered set of strategy tags.
///
/// Insertion order is kept for display; inserting a tag twice is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategySet<S>(Vec<S>);

impl<S> Default for StrategySet<S> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<S: StrategyLabel> StrategySet<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: S) {
        if !self.0.contains(&tag) {
            self.0.push(tag);
        }
    }

    #[must_use]
    pub fn contains(&self, tag: S) -> bool {
        self.0.contains(&tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = S> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.iter().map(StrategyLabel::label).collect()
    }
}

impl<S: StrategyLabel> FromIterator<S> for StrategySet<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl<S: StrategyLabel> Serialize for StrategySet<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.0.iter().map(|tag| tag.label()))
    }
}

/// Coarse display bucket used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisplayCategory {
    Star,
    Opportunity,
    Standard,
}

impl DisplayCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Star => "STAR",
            Self::Opportunity => "OPPORTUNITY",
            Self::Standard => "STANDARD",
        }
    }
}

impl fmt::Display for DisplayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
