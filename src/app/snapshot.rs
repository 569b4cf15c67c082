//! Static digest the dashboard loads without a network request.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use super::fixed_income::private_benchmarks;
use super::reconcile::Screening;
use crate::domain::{Economy, Etf, PrivateBenchmark, ScoredFund, ScoredStock, TreasuryBond};
use crate::error::{Error, Result};

/// Global the dashboard reads.
const GLOBAL: &str = "window.INVEST_DATA";

/// Everything the dashboard renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Local time, pt-BR format.
    pub updated_at: String,
    pub economy: Economy,
    pub stocks: Vec<ScoredStock>,
    pub fiis: Vec<ScoredFund>,
    pub etfs: Vec<Etf>,
    pub fixed_income: FixedIncome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FixedIncome {
    pub tesouro: Vec<TreasuryBond>,
    pub private: Vec<PrivateBenchmark>,
}

impl Snapshot {
    /// Assemble a snapshot from a finished run.
    #[must_use]
    pub fn new(screening: Screening, tesouro: Vec<TreasuryBond>, at: DateTime<Local>) -> Self {
        Self {
            updated_at: pt_br_timestamp(at),
            economy: screening.economy,
            stocks: screening.stocks,
            fiis: screening.funds,
            etfs: curated_etfs(),
            fixed_income: FixedIncome {
                tesouro,
                private: private_benchmarks(screening.rate),
            },
        }
    }

    #[must_use]
    pub fn has_assets(&self) -> bool {
        !self.stocks.is_empty() || !self.fiis.is_empty()
    }

    /// `window.INVEST_DATA = {...};`
    pub fn render(&self) -> Result<String> {
        Ok(format!("{GLOBAL} = {};", serde_json::to_string_pretty(self)?))
    }
}

/// `10/02/2026, 14:13:41`
#[must_use]
pub fn pt_br_timestamp(at: DateTime<Local>) -> String {
    at.format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Popular ETFs listed for reference; no fundamentals are scraped.
#[must_use]
pub fn curated_etfs() -> Vec<Etf> {
    [
        ("IVVB11", "S&P 500 Brazilian ETF", "International"),
        ("BOVA11", "Ibovespa Index ETF", "Index"),
        ("SMAL11", "Small Caps ETF", "Small Caps"),
        ("HASH11", "Crypto Index ETF", "Crypto"),
        ("DIVO11", "High Dividend ETF", "Diversified"),
    ]
    .into_iter()
    .map(|(ticker, name, kind)| Etf {
        ticker: ticker.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
    })
    .collect()
}

/// Writes snapshots to a fixed path.
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the snapshot file.
    ///
    /// Refuses a snapshot with no stocks and no funds, leaving the previous
    /// file untouched.
    #[allow(clippy::result_large_err)]
    pub fn write(&self, snapshot: &Snapshot) -> Result<()> {
        if !snapshot.has_assets() {
            return Err(Error::NoData(self.path.display().to_string()));
        }
        write_atomic(&self.path, snapshot.render()?.as_bytes())?;
        info!(
            path = %self.path.display(),
            stocks = snapshot.stocks.len(),
            funds = snapshot.fiis.len(),
            "Snapshot written"
        );
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over `path`.
///
/// Creates the parent directory if it doesn't exist.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;

    let cleanup_and_err = |e| {
        let _ = fs::remove_file(&temp_path);
        e
    };

    file.write_all(bytes).map_err(cleanup_and_err)?;
    file.sync_all().map_err(cleanup_and_err)?;
    fs::rename(&temp_path, path).map_err(cleanup_and_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BenchmarkRate, RawFundRecord};
    use crate::scoring::score_fund;
    use chrono::TimeZone;

    fn screening(with_fund: bool) -> Screening {
        let rate = BenchmarkRate::new(10.75);
        let funds = if with_fund {
            let raw = RawFundRecord {
                price: 100.0,
                dividend_yield: 11.0,
                pb: 0.95,
                liquidity: 2_000_000.0,
                segment: "Títulos e Val. Mob.".into(),
                ..RawFundRecord::new("KNCR11")
            };
            vec![score_fund(&raw, None, rate)]
        } else {
            Vec::new()
        };
        Screening {
            rate,
            economy: Economy {
                dollar: Some(5.4),
                selic: Some(10.75),
            },
            stocks: Vec::new(),
            funds,
        }
    }

    #[test]
    fn test_timestamp_format() {
        let at = Local.with_ymd_and_hms(2026, 2, 10, 14, 13, 41).unwrap();
        assert_eq!(pt_br_timestamp(at), "10/02/2026, 14:13:41");
    }

    #[test]
    fn test_render_assigns_global() {
        let snapshot = Snapshot::new(screening(true), Vec::new(), Local::now());
        let text = snapshot.render().unwrap();

        assert!(text.starts_with("window.INVEST_DATA = {"));
        assert!(text.ends_with("};"));
        let json: serde_json::Value =
            serde_json::from_str(&text["window.INVEST_DATA = ".len()..text.len() - 1]).unwrap();
        assert_eq!(json["economy"]["selic"], 10.75);
        assert_eq!(json["fiis"][0]["ticker"], "KNCR11");
        assert_eq!(json["etfs"].as_array().unwrap().len(), 5);
        assert_eq!(json["fixedIncome"]["private"].as_array().unwrap().len(), 4);
        assert!(json["updatedAt"].is_string());
    }

    #[test]
    fn test_refuses_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.js");
        std::fs::write(&path, "previous").unwrap();

        let writer = SnapshotWriter::new(path.clone());
        let snapshot = Snapshot::new(screening(false), Vec::new(), Local::now());

        assert!(matches!(writer.write(&snapshot), Err(Error::NoData(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
    }

    #[test]
    fn test_write_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("data.js");
        let writer = SnapshotWriter::new(path.clone());

        writer
            .write(&Snapshot::new(screening(true), Vec::new(), Local::now()))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("KNCR11"));
        assert!(!path.with_extension("tmp").exists());
    }
}
