//! Handler for the `config` command group.

use serde_json::json;

use crate::adapter::inbound::cli::loader::LoadedConfig;
use crate::adapter::inbound::cli::output;
use crate::error::Result;

fn source_label(loaded: &LoadedConfig) -> String {
    loaded
        .path
        .as_ref()
        .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string())
}

/// Execute `config validate`. Loading already validated the file.
pub fn execute_validate(loaded: &LoadedConfig) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "valid": true,
            "path": loaded.path.as_ref().map(|p| p.display().to_string()),
        }));
        return Ok(());
    }

    output::success(&format!("Configuration is valid: {}", source_label(loaded)));
    if loaded.path.is_none() {
        output::hint("no config.toml found; built-in defaults are in effect");
    }
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(loaded: &LoadedConfig) -> Result<()> {
    let config = &loaded.config;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": loaded.path.as_ref().map(|p| p.display().to_string()),
            "enrichment": {
                "concurrency": config.enrichment.concurrency,
                "delay_ms": config.enrichment.delay_ms,
                "timeout_secs": config.enrichment.timeout_secs,
                "top_stocks": config.enrichment.top_stocks,
            },
            "screening": {
                "fallback_selic": config.screening.fallback_selic,
                "first_pass_min_score": config.screening.first_pass_min_score,
                "final_min_score": config.screening.final_min_score,
                "min_stock_liquidity": config.screening.min_stock_liquidity,
                "star_min_liquidity": config.screening.star_min_liquidity,
            },
            "brapi_token": config.sources.brapi_token.is_some(),
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("File", source_label(loaded));
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);

    output::section("Sources");
    output::field("Fundamentus", &config.sources.fundamentus_url);
    output::field("Brapi", &config.sources.brapi_url);
    output::field("Investidor10", &config.sources.investidor10_url);
    output::field("BCB SGS", &config.sources.bcb_sgs_url);
    output::field("Dollar", &config.sources.dollar_url);
    output::field("Timeout", format!("{}s", config.sources.timeout_secs));
    if config.sources.brapi_token.is_some() {
        output::success("BRAPI_TOKEN loaded from environment");
    } else {
        output::note("BRAPI_TOKEN not set");
    }

    output::section("Enrichment");
    output::field("Workers", config.enrichment.concurrency);
    output::field("Delay", format!("{}ms", config.enrichment.delay_ms));
    output::field("Timeout", format!("{}s", config.enrichment.timeout_secs));
    output::field(
        "Top stocks",
        match config.enrichment.top_stocks {
            0 => "none".to_string(),
            n => n.to_string(),
        },
    );

    output::section("Screening");
    output::field("Fallback Selic", format!("{:.2}%", config.screening.fallback_selic));
    output::field("First pass", config.screening.first_pass_min_score);
    output::field("Final pass", config.screening.final_min_score);
    output::field("Min liquidity", config.screening.min_stock_liquidity);
    output::field("Star liquidity", config.screening.star_min_liquidity);

    output::section("Output");
    output::field("Snapshot", config.output.snapshot_path.display());
    output::field("History", config.output.history_dir.display());
    output::field("Snowball", config.output.snowball_path.display());
    output::field("Fresh for", format!("{}h", config.output.dividend_max_age_hours));
    Ok(())
}
