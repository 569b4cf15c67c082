//! Private fixed-income yields estimated from the benchmark rate.

use crate::domain::{BenchmarkRate, PrivateBenchmark};

/// CDI trades this far below the Selic target.
const CDI_SPREAD: f64 = 0.10;
/// Above this Selic the savings account pays a fixed 0.5% a month.
const SAVINGS_RULE_THRESHOLD: f64 = 8.5;
/// 0.5% a month compounded, before TR.
const SAVINGS_FIXED_ANNUAL: f64 = 6.17;
const SAVINGS_SELIC_SHARE: f64 = 0.70;
const LCI_CDI_SHARE: f64 = 0.90;
/// Typical prefixed CDB premium over the Selic.
const PREFIXED_PREMIUM: f64 = 1.5;

/// Reference rows shown next to the Tesouro Direto offers.
#[must_use]
pub fn private_benchmarks(selic: BenchmarkRate) -> Vec<PrivateBenchmark> {
    let selic = selic.value();
    let cdi = selic - CDI_SPREAD;
    let savings = if selic > SAVINGS_RULE_THRESHOLD {
        SAVINGS_FIXED_ANNUAL
    } else {
        selic * SAVINGS_SELIC_SHARE
    };

    vec![
        row("CDB 100% CDI", format!("{cdi:.2}%"), "Pós-fixado"),
        row(
            "LCI/LCA 90% CDI",
            format!("{:.2}%", cdi * LCI_CDI_SHARE),
            "Isento IR",
        ),
        row("Poupança (Est.)", format!("{savings:.2}% + TR"), "Isento IR"),
        row(
            "CDB Pré-fixado (Est.)",
            format!("{:.2}%", selic + PREFIXED_PREMIUM),
            "Prefixado",
        ),
    ]
}

fn row(name: &str, rate: String, kind: &str) -> PrivateBenchmark {
    PrivateBenchmark {
        name: name.to_string(),
        rate,
        kind: kind.to_string(),
    }
}
