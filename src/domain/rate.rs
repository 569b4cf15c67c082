//! Benchmark interest rate shared by a screening run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Selic-equivalent reference rate in percent.
///
/// Never NaN or infinite: constructors substitute a fallback instead.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkRate(f64);

impl BenchmarkRate {
    /// Rate used when the central bank series cannot be read.
    pub const FALLBACK: f64 = 11.75;

    /// Wrap a rate, replacing non-finite values with [`Self::FALLBACK`].
    #[must_use]
    pub fn new(percent: f64) -> Self {
        Self::with_fallback(percent, Self::FALLBACK)
    }

    /// Wrap a rate, replacing non-finite values with `fallback`.
    #[must_use]
    pub fn with_fallback(percent: f64, fallback: f64) -> Self {
        if percent.is_finite() {
            Self(percent)
        } else if fallback.is_finite() {
            Self(fallback)
        } else {
            Self(Self::FALLBACK)
        }
    }

    /// Rate from an optional lookup result.
    #[must_use]
    pub fn from_option(percent: Option<f64>, fallback: f64) -> Self {
        Self::with_fallback(percent.unwrap_or(f64::NAN), fallback)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Minimum dividend yield considered sufficient at this rate.
    #[must_use]
    pub fn yield_threshold(self) -> f64 {
        f64::max(6.0, self.0 * 0.5)
    }
}

impl Default for BenchmarkRate {
    fn default() -> Self {
        Self(Self::FALLBACK)
    }
}

impl fmt::Display for BenchmarkRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_rates_fall_back() {
        assert_eq!(BenchmarkRate::new(f64::NAN).value(), 11.75);
        assert_eq!(BenchmarkRate::new(f64::INFINITY).value(), 11.75);
        assert_eq!(BenchmarkRate::from_option(None, 13.0).value(), 13.0);
        assert_eq!(BenchmarkRate::from_option(Some(15.0), 13.0).value(), 15.0);
    }

    #[test]
    fn yield_threshold_tracks_rate_above_twelve() {
        assert_eq!(BenchmarkRate::new(10.0).yield_threshold(), 6.0);
        assert_eq!(BenchmarkRate::new(15.0).yield_threshold(), 7.5);
    }
}
