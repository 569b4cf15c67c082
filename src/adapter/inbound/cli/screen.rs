//! Handler for the `screen` command.

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::ScreenArgs;
use crate::adapter::inbound::cli::output;
use crate::app::{AssetType, Config, HistoryStore, ScreenResult, Screener, Sources};
use crate::domain::{Ranked, ScoredFund, ScoredStock, NO_MAGIC_NUMBER};
use crate::error::Result;

#[derive(Tabled)]
struct StockRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "DY %")]
    dy: String,
    #[tabled(rename = "P/L")]
    pe: String,
    #[tabled(rename = "P/VP")]
    pb: String,
    #[tabled(rename = "Graham")]
    upside: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Strategies")]
    strategies: String,
}

impl From<&ScoredStock> for StockRow {
    fn from(stock: &ScoredStock) -> Self {
        Self {
            ticker: stock.raw.ticker.to_string(),
            price: format!("{:.2}", stock.raw.price),
            score: format!("{:.1}", stock.score),
            dy: format!("{:.2}", stock.raw.dividend_yield),
            pe: format!("{:.2}", stock.raw.pe),
            pb: format!("{:.2}", stock.raw.pb),
            upside: if stock.graham_fair_price > 0.0 {
                output::signed(stock.upside, format!("{:+.1}%", stock.upside))
            } else {
                "-".into()
            },
            category: stock.category.map_or_else(|| "-".into(), |c| c.to_string()),
            strategies: stock.strategies.labels().join(" "),
        }
    }
}

#[derive(Tabled)]
struct FundRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "DY %")]
    dy: String,
    #[tabled(rename = "P/VP")]
    pb: String,
    #[tabled(rename = "Magic")]
    magic: String,
    #[tabled(rename = "Strategies")]
    strategies: String,
}

impl From<&ScoredFund> for FundRow {
    fn from(fund: &ScoredFund) -> Self {
        Self {
            ticker: fund.raw.ticker.to_string(),
            kind: fund.fund_type.to_string(),
            price: format!("{:.2}", fund.raw.price),
            score: format!("{:.1}", fund.score),
            dy: format!("{:.2}", fund.raw.dividend_yield),
            pb: format!("{:.2}", fund.raw.pb),
            magic: if fund.magic_number == NO_MAGIC_NUMBER {
                "-".into()
            } else {
                fund.magic_number.to_string()
            },
            strategies: fund.strategies.labels().join(" "),
        }
    }
}

fn screener(args: &ScreenArgs) -> Result<Screener> {
    Ok(Screener::builder()
        .asset_type(&args.asset_type)?
        .min_liquidity(args.min_liquidity)
        .min_yield(args.min_yield)
        .max_pb(args.max_pb)
        .min_pb(args.min_pb)
        .max_debt_to_equity(args.max_debt)
        .min_score(args.min_score)
        .exclude_strategies(
            args.exclude
                .iter()
                .map(|label| label.trim().to_ascii_uppercase())
                .filter(|label| !label.is_empty())
                .collect(),
        )
        .save(args.save))
}

pub async fn execute(config: &Config, args: &ScreenArgs) -> Result<()> {
    // Bad options fail before any source is contacted.
    let screener = screener(args)?;
    let sources = Sources::from_config(config)?;
    let reconciler = sources.reconciler(config);
    let history = HistoryStore::new(&config.output.history_dir);

    output::header(env!("CARGO_PKG_VERSION"));
    let pb = output::spinner(&format!("Screening {}...", screener.kind()));
    let result = screener.run(&reconciler, &history).await?;
    output::spinner_success(&pb, &format!("{} assets kept", result.len()));

    if output::is_json() {
        output::json_output(document(&result)?);
        return Ok(());
    }
    render(&result, args.limit);
    if args.save {
        output::success(&format!("Results saved under {}", history.dir().display()));
    }
    Ok(())
}

fn document(result: &ScreenResult) -> Result<serde_json::Value> {
    let items = match result.asset_type {
        AssetType::Stock => serde_json::to_value(&result.screening.stocks)?,
        AssetType::Fii => serde_json::to_value(&result.screening.funds)?,
    };
    Ok(json!({
        "command": "screen",
        "type": result.asset_type.as_str(),
        "economy": result.screening.economy,
        "count": result.len(),
        "items": items,
    }))
}

fn render(result: &ScreenResult, limit: usize) {
    output::section("Economy");
    output::field("Selic", format!("{:.2}%", result.screening.rate.value()));
    if let Some(dollar) = result.screening.economy.dollar {
        output::field("Dollar", format!("R$ {dollar:.2}"));
    }

    if result.is_empty() {
        output::warning("No asset passed the filters");
        output::hint("relax --min-score or --min-yield, or check the logs for source failures");
        return;
    }

    let take = if limit == 0 { usize::MAX } else { limit };
    match result.asset_type {
        AssetType::Stock => {
            output::section("Stocks");
            output::table(result.screening.stocks.iter().take(take).map(StockRow::from));
        }
        AssetType::Fii => {
            output::section("Funds");
            output::table(result.screening.funds.iter().take(take).map(FundRow::from));
        }
    }

    if result.len() > take {
        output::note(&format!("{} more not shown (use -n 0 for all)", result.len() - take));
    }
    let best = match result.asset_type {
        AssetType::Stock => result.screening.stocks.first().map(|s| s.ticker().to_string()),
        AssetType::Fii => result.screening.funds.first().map(|f| f.ticker().to_string()),
    };
    if let Some(best) = best {
        output::field("Top pick", output::highlight(best));
    }
}
