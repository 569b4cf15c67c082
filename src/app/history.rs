//! Dated result archives and per-ticker dividend histories.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::snapshot::write_atomic;
use crate::domain::{DividendEvent, Economy, Ticker};
use crate::error::Result;

#[derive(Serialize)]
struct ResultsFile<'a, T> {
    date: DateTime<Utc>,
    count: usize,
    economy: Option<Economy>,
    #[serde(rename = "type")]
    kind: &'a str,
    items: &'a [T],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DividendFile<'a> {
    ticker: &'a str,
    updated_at: DateTime<Utc>,
    history: &'a [DividendEvent],
}

#[derive(Deserialize)]
struct StoredResults {
    #[serde(default)]
    items: Vec<StoredItem>,
}

#[derive(Deserialize)]
struct StoredItem {
    #[serde(default)]
    ticker: Ticker,
}

/// Files under the history directory.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `YYYY-MM-DD-{kind}-results.json`, overwriting today's file.
    pub fn save_results<T: Serialize>(
        &self,
        items: &[T],
        kind: &str,
        economy: Option<Economy>,
        now: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let path = self
            .dir
            .join(format!("{}-{kind}-results.json", now.format("%Y-%m-%d")));
        let file = ResultsFile {
            date: now,
            count: items.len(),
            economy,
            kind,
            items,
        };
        write_atomic(&path, serde_json::to_string_pretty(&file)?.as_bytes())?;
        info!(path = %path.display(), count = items.len(), "History saved");
        Ok(path)
    }

    /// `{TICKER}.json` with the full distribution history.
    pub fn save_dividends(
        &self,
        ticker: &Ticker,
        events: &[DividendEvent],
        now: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let path = self.dividend_path(ticker);
        let file = DividendFile {
            ticker: ticker.as_str(),
            updated_at: now,
            history: events,
        };
        write_atomic(&path, serde_json::to_string_pretty(&file)?.as_bytes())?;
        debug!(ticker = %ticker, events = events.len(), "Dividend history saved");
        Ok(path)
    }

    /// Whether the ticker's dividend file was written less than `max_age` ago.
    #[must_use]
    pub fn is_fresh(&self, ticker: &Ticker, max_age: Duration) -> bool {
        fs::metadata(self.dividend_path(ticker))
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .is_some_and(|age| age < max_age)
    }

    /// Tickers of the newest `*-results.json` file, if any.
    ///
    /// Dated names sort chronologically, so the lexically greatest wins.
    pub fn latest_result_tickers(&self) -> Result<Vec<Ticker>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let latest = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with("-results.json"))
            })
            .max();
        let Some(path) = latest else {
            return Ok(Vec::new());
        };

        let file: StoredResults = serde_json::from_str(&fs::read_to_string(&path)?)?;
        debug!(path = %path.display(), count = file.items.len(), "Loaded latest results");
        Ok(file
            .items
            .into_iter()
            .map(|item| item.ticker)
            .filter(|ticker| !ticker.is_empty())
            .collect())
    }

    fn dividend_path(&self, ticker: &Ticker) -> PathBuf {
        self.dir.join(format!("{}.json", ticker.as_str()))
    }
}
