//! Handler for the `export` command.

use std::sync::Arc;

use serde_json::json;

use crate::adapter::inbound::cli::command::ExportArgs;
use crate::adapter::inbound::cli::output;
use crate::app::jobs;
use crate::app::{Config, SnapshotWriter, Sources};
use crate::error::Result;

pub async fn execute(config: &Config, args: &ExportArgs) -> Result<()> {
    let sources = Sources::from_config(config)?;
    let reconciler = sources.reconciler(config);
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.snapshot_path.clone());
    let writer = SnapshotWriter::new(path);

    output::header(env!("CARGO_PKG_VERSION"));
    let pb = output::spinner("Screening stocks and funds...");
    let report = match jobs::export(&reconciler, Arc::clone(&sources.treasury), &writer).await {
        Ok(report) => {
            output::spinner_success(&pb, "Screening complete");
            report
        }
        Err(e) => {
            output::spinner_fail(&pb, "Nothing to export");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "export",
            "path": report.path.display().to_string(),
            "selic": report.rate.value(),
            "stocks": report.stocks,
            "funds": report.funds,
            "treasury_bonds": report.bonds,
        }));
        return Ok(());
    }

    output::section("Snapshot");
    output::field("Path", report.path.display());
    output::field("Selic", format!("{:.2}%", report.rate.value()));
    output::field("Stocks", report.stocks);
    output::field("Funds", report.funds);
    output::field("Treasury", report.bonds);
    if report.bonds == 0 {
        output::warning(
            "No treasury offers; the fixed income section lists private benchmarks only",
        );
    }
    output::success("Dashboard data updated");
    Ok(())
}
