//! Handler for the `history` command.

use std::time::Duration;

use serde_json::json;

use crate::adapter::inbound::cli::command::HistoryArgs;
use crate::adapter::inbound::cli::output;
use crate::app::{Backfill, Config, HistoryStore, Sources};
use crate::domain::Ticker;
use crate::error::Result;

pub async fn execute(config: &Config, args: &HistoryArgs) -> Result<()> {
    let store = HistoryStore::new(&config.output.history_dir);
    let tickers = tickers(args, &store)?;
    if tickers.is_empty() {
        output::warning("No tickers given and no saved screening found");
        output::hint("run `b3-screener screen --type fii --save` first, or pass tickers");
        return Ok(());
    }

    let sources = Sources::from_config(config)?;
    let backfill = Backfill {
        max_age: config.output.dividend_max_age(),
        force: args.force,
        delay: Duration::from_millis(config.enrichment.delay_ms),
    };

    output::header(env!("CARGO_PKG_VERSION"));
    let pb = output::spinner(&format!("Fetching {} dividend histories...", tickers.len()));
    let report = backfill.run(sources.history.as_ref(), &store, &tickers).await?;
    output::spinner_success(&pb, &format!("{} histories saved", report.saved.len()));

    if output::is_json() {
        output::json_output(json!({
            "command": "history",
            "dir": store.dir().display().to_string(),
            "saved": names(&report.saved),
            "skipped": names(&report.skipped),
            "empty": names(&report.empty),
            "failed": names(&report.failed),
        }));
        return Ok(());
    }

    output::section("Dividend history");
    output::field("Directory", store.dir().display());
    output::field("Saved", report.saved.len());
    if !report.skipped.is_empty() {
        output::field("Fresh", report.skipped.len());
        output::note("files younger than the freshness window were kept; use --force to refetch");
    }
    if !report.empty.is_empty() {
        output::warning(&format!("No distributions found: {}", names(&report.empty).join(", ")));
    }
    if !report.failed.is_empty() {
        output::warning(&format!("Fetch failed: {}", names(&report.failed).join(", ")));
    }
    Ok(())
}

fn names(list: &[Ticker]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

/// Explicit tickers, deduplicated in order, else the latest saved screening.
fn tickers(args: &HistoryArgs, store: &HistoryStore) -> Result<Vec<Ticker>> {
    if args.tickers.is_empty() {
        return store.latest_result_tickers();
    }

    let mut tickers: Vec<Ticker> = Vec::with_capacity(args.tickers.len());
    for ticker in args.tickers.iter().map(Ticker::new) {
        if !ticker.is_empty() && !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }
    Ok(tickers)
}
