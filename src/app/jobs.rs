//! End-to-end jobs behind the CLI commands.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, Utc};
use tracing::{info, warn};

use super::history::HistoryStore;
use super::reconcile::Reconciler;
use super::snapshot::{Snapshot, SnapshotWriter};
use super::snowball::{self, SnowballSection};
use crate::domain::{BenchmarkRate, Ticker};
use crate::error::Result;
use crate::port::{DividendHistorySource, TreasurySource};

/// What an export wrote.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub path: PathBuf,
    pub rate: BenchmarkRate,
    pub stocks: usize,
    pub funds: usize,
    pub bonds: usize,
}

/// Full run into the dashboard snapshot.
///
/// Treasury offers are fetched alongside the run; their failure only leaves
/// the section empty. Fails with `NoData` when nothing was discovered.
pub async fn export(
    reconciler: &Reconciler,
    treasury: Arc<dyn TreasurySource>,
    writer: &SnapshotWriter,
) -> Result<ExportReport> {
    let (screening, bonds) = tokio::join!(reconciler.run(), async {
        treasury.fetch_bonds().await.unwrap_or_else(|e| {
            warn!(source = treasury.source_name(), error = %e, "Treasury offers unavailable");
            Vec::new()
        })
    });

    let rate = screening.rate;
    let snapshot = Snapshot::new(screening, bonds, Local::now());
    writer.write(&snapshot)?;

    Ok(ExportReport {
        path: writer.path().to_path_buf(),
        rate,
        stocks: snapshot.stocks.len(),
        funds: snapshot.fiis.len(),
        bonds: snapshot.fixed_income.tesouro.len(),
    })
}

/// Fund run into the snowball CSV.
pub async fn snowball(
    reconciler: &Reconciler,
    path: PathBuf,
) -> Result<(PathBuf, Vec<(SnowballSection, usize)>)> {
    let screening = reconciler.run_funds().await;
    let summary = snowball::write(&path, &screening.funds)?;
    Ok((path, summary))
}

/// Outcome of a dividend backfill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub saved: Vec<Ticker>,
    /// Files younger than the freshness window.
    pub skipped: Vec<Ticker>,
    /// Tickers the source had no distributions for.
    pub empty: Vec<Ticker>,
    pub failed: Vec<Ticker>,
}

/// Dividend history settings.
#[derive(Debug, Clone, Copy)]
pub struct Backfill {
    pub max_age: Duration,
    /// Refetch even fresh files.
    pub force: bool,
    /// Pause between two tickers.
    pub delay: Duration,
}

impl Backfill {
    /// Fetch and store the history of each ticker, sequentially.
    pub async fn run(
        &self,
        source: &dyn DividendHistorySource,
        store: &HistoryStore,
        tickers: &[Ticker],
    ) -> Result<BackfillReport> {
        let mut report = BackfillReport::default();

        for (i, ticker) in tickers.iter().enumerate() {
            if !self.force && store.is_fresh(ticker, self.max_age) {
                report.skipped.push(ticker.clone());
                continue;
            }

            match source.fetch_history(ticker).await {
                Ok(events) if events.is_empty() => report.empty.push(ticker.clone()),
                Ok(events) => {
                    store.save_dividends(ticker, &events, Utc::now())?;
                    report.saved.push(ticker.clone());
                }
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "Dividend history fetch failed");
                    report.failed.push(ticker.clone());
                }
            }

            if i + 1 < tickers.len() && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        info!(
            saved = report.saved.len(),
            skipped = report.skipped.len(),
            empty = report.empty.len(),
            failed = report.failed.len(),
            "Backfill finished"
        );
        Ok(report)
    }
}
