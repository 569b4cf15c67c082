//! Handler for the `snowball` command.

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::SnowballArgs;
use crate::adapter::inbound::cli::output;
use crate::app::{jobs, Config, Sources};
use crate::error::Result;

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "Section")]
    section: &'static str,
    #[tabled(rename = "Funds")]
    funds: usize,
}

pub async fn execute(config: &Config, args: &SnowballArgs) -> Result<()> {
    let sources = Sources::from_config(config)?;
    let reconciler = sources.reconciler(config);
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.snowball_path.clone());

    output::header(env!("CARGO_PKG_VERSION"));
    let pb = output::spinner("Screening funds...");
    let (path, summary) = jobs::snowball(&reconciler, path).await?;
    let total: usize = summary.iter().map(|(_, count)| count).sum();
    output::spinner_success(&pb, &format!("{total} funds ranked"));

    if output::is_json() {
        let sections: Vec<_> = summary
            .iter()
            .map(|(section, count)| json!({ "section": section.label(), "funds": count }))
            .collect();
        output::json_output(json!({
            "command": "snowball",
            "path": path.display().to_string(),
            "sections": sections,
        }));
        return Ok(());
    }

    if total == 0 {
        output::warning("No fund passed the screening; the CSV only has headers");
    } else {
        output::section("Sections");
        output::table(summary.iter().map(|(section, funds)| SectionRow {
            section: section.label(),
            funds: *funds,
        }));
    }
    output::field("Path", path.display());
    output::success("Snowball spreadsheet written");
    Ok(())
}
