//! In-memory implementations of the collaborator ports.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{
    DividendEvent, EnrichmentRecord, RawFundRecord, RawStockRecord, Ticker, TreasuryBond,
};
use crate::error::{Result, SourceError};
use crate::port::{
    DividendHistorySource, EconomySource, FundSource, MetadataSource, StockSource, TreasurySource,
};

/// Stock source answering a fixed list and counting calls.
pub struct StaticStocks {
    name: &'static str,
    stocks: Vec<RawStockRecord>,
    calls: Mutex<usize>,
}

impl StaticStocks {
    pub fn new(name: &'static str, stocks: Vec<RawStockRecord>) -> Self {
        Self {
            name,
            stocks,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl StockSource for StaticStocks {
    async fn fetch_stocks(&self) -> Result<Vec<RawStockRecord>> {
        *self.calls.lock() += 1;
        Ok(self.stocks.clone())
    }

    fn source_name(&self) -> &'static str {
        self.name
    }
}

/// Fund source answering a fixed list.
pub struct StaticFunds {
    name: &'static str,
    funds: Vec<RawFundRecord>,
}

impl StaticFunds {
    pub fn new(name: &'static str, funds: Vec<RawFundRecord>) -> Self {
        Self { name, funds }
    }
}

#[async_trait]
impl FundSource for StaticFunds {
    async fn fetch_funds(&self) -> Result<Vec<RawFundRecord>> {
        Ok(self.funds.clone())
    }

    fn source_name(&self) -> &'static str {
        self.name
    }
}

/// Source whose every call fails with an HTTP 503.
#[derive(Debug, Clone, Copy)]
pub struct FailingSource {
    name: &'static str,
}

impl FailingSource {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }

    fn error(&self) -> crate::error::Error {
        SourceError::Status {
            source_name: self.name,
            status: 503,
        }
        .into()
    }
}

#[async_trait]
impl StockSource for FailingSource {
    async fn fetch_stocks(&self) -> Result<Vec<RawStockRecord>> {
        Err(self.error())
    }

    fn source_name(&self) -> &'static str {
        self.name
    }
}

#[async_trait]
impl FundSource for FailingSource {
    async fn fetch_funds(&self) -> Result<Vec<RawFundRecord>> {
        Err(self.error())
    }

    fn source_name(&self) -> &'static str {
        self.name
    }
}

#[async_trait]
impl EconomySource for FailingSource {
    async fn selic(&self) -> Result<f64> {
        Err(self.error())
    }

    async fn dollar(&self) -> Result<f64> {
        Err(self.error())
    }

    fn source_name(&self) -> &'static str {
        self.name
    }
}

#[async_trait]
impl MetadataSource for FailingSource {
    async fn fetch_metadata(&self, _ticker: &Ticker) -> Result<EnrichmentRecord> {
        Err(self.error())
    }

    fn source_name(&self) -> &'static str {
        self.name
    }
}

#[async_trait]
impl TreasurySource for FailingSource {
    async fn fetch_bonds(&self) -> Result<Vec<TreasuryBond>> {
        Err(self.error())
    }

    fn source_name(&self) -> &'static str {
        self.name
    }
}

/// Metadata source with per-ticker scripted answers.
///
/// Unscripted tickers get an empty record. Every call is recorded.
#[derive(Default)]
pub struct ScriptedMetadata {
    records: HashMap<Ticker, EnrichmentRecord>,
    failing: HashSet<Ticker>,
    delays: HashMap<Ticker, Duration>,
    calls: Mutex<Vec<Ticker>>,
}

impl ScriptedMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_record(mut self, record: EnrichmentRecord) -> Self {
        self.records.insert(record.ticker.clone(), record);
        self
    }

    #[must_use]
    pub fn failing(mut self, ticker: Ticker) -> Self {
        self.failing.insert(ticker);
        self
    }

    /// Sleep before answering for `ticker`.
    #[must_use]
    pub fn delayed(mut self, ticker: Ticker, delay: Duration) -> Self {
        self.delays.insert(ticker, delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls_for(&self, ticker: &Ticker) -> usize {
        self.calls.lock().iter().filter(|t| *t == ticker).count()
    }
}

#[async_trait]
impl MetadataSource for ScriptedMetadata {
    async fn fetch_metadata(&self, ticker: &Ticker) -> Result<EnrichmentRecord> {
        self.calls.lock().push(ticker.clone());

        if let Some(delay) = self.delays.get(ticker) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(ticker) {
            return Err(SourceError::Status {
                source_name: "scripted",
                status: 500,
            }
            .into());
        }

        Ok(self
            .records
            .get(ticker)
            .cloned()
            .unwrap_or_else(|| EnrichmentRecord::empty(ticker.clone())))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

/// Economy source with fixed answers; `None` fails the call.
#[derive(Debug, Clone, Copy)]
pub struct StaticEconomy {
    pub selic: Option<f64>,
    pub dollar: Option<f64>,
}

impl StaticEconomy {
    pub fn new(selic: f64, dollar: f64) -> Self {
        Self {
            selic: Some(selic),
            dollar: Some(dollar),
        }
    }

    fn answer(value: Option<f64>) -> Result<f64> {
        value.ok_or_else(|| {
            SourceError::Empty {
                source_name: "static-economy",
            }
            .into()
        })
    }
}

#[async_trait]
impl EconomySource for StaticEconomy {
    async fn selic(&self) -> Result<f64> {
        Self::answer(self.selic)
    }

    async fn dollar(&self) -> Result<f64> {
        Self::answer(self.dollar)
    }

    fn source_name(&self) -> &'static str {
        "static-economy"
    }
}

/// Dividend history and treasury source with fixed answers.
#[derive(Default)]
pub struct StaticHistory {
    histories: HashMap<Ticker, Vec<DividendEvent>>,
    bonds: Vec<TreasuryBond>,
    calls: Mutex<usize>,
}

impl StaticHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_history(mut self, ticker: impl Into<Ticker>, events: Vec<DividendEvent>) -> Self {
        self.histories.insert(ticker.into(), events);
        self
    }

    #[must_use]
    pub fn with_bonds(mut self, bonds: Vec<TreasuryBond>) -> Self {
        self.bonds = bonds;
        self
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl DividendHistorySource for StaticHistory {
    async fn fetch_history(&self, ticker: &Ticker) -> Result<Vec<DividendEvent>> {
        *self.calls.lock() += 1;
        Ok(self.histories.get(ticker).cloned().unwrap_or_default())
    }

    fn source_name(&self) -> &'static str {
        "static-history"
    }
}

#[async_trait]
impl TreasurySource for StaticHistory {
    async fn fetch_bonds(&self) -> Result<Vec<TreasuryBond>> {
        Ok(self.bonds.clone())
    }

    fn source_name(&self) -> &'static str {
        "static-history"
    }
}
