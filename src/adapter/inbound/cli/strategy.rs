//! Strategy tag listing.

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::output;
use crate::domain::{FundStrategy, StockStrategy, StrategyLabel};

#[derive(Tabled)]
struct StrategyRow {
    #[tabled(rename = "Tag")]
    name: &'static str,
    #[tabled(rename = "Applies to")]
    asset: &'static str,
    #[tabled(rename = "Rule")]
    rule: &'static str,
}

fn rows() -> Vec<StrategyRow> {
    let stocks = StockStrategy::ALL.into_iter().map(|s| StrategyRow {
        name: s.label(),
        asset: "stock",
        rule: s.describe(),
    });
    let funds = FundStrategy::ALL.into_iter().map(|s| StrategyRow {
        name: s.label(),
        asset: "fii",
        rule: s.describe(),
    });
    stocks.chain(funds).collect()
}

/// List every strategy tag the scorers can attach.
pub fn list() {
    if output::is_json() {
        let strategies: Vec<_> = rows()
            .into_iter()
            .map(|row| json!({ "name": row.name, "asset": row.asset, "rule": row.rule }))
            .collect();
        output::json_output(json!({
            "command": "strategies",
            "strategies": strategies,
        }));
        return;
    }
    if output::is_quiet() {
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Strategy tags");
    output::table(rows());
    output::hint("exclude tags from a screen with --exclude TAG,TAG");
}
