//! Three-phase screening run: discover, enrich, re-score.
//!
//! Discovery is cheap and broad; the metadata source is slow and
//! authoritative. Only the candidates the first pass keeps are enriched,
//! and the final pass scores them again with everything known.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{info, warn};

use super::config::ScreeningConfig;
use super::enrichment::{Enricher, EnrichmentPolicy};
use crate::domain::{
    BenchmarkRate, DividendInfo, Economy, Enrichments, RawFundRecord, RawStockRecord, ScoredFund,
    ScoredStock, Ticker,
};
use crate::port::{EconomySource, FundSource, MetadataSource, StockSource};
use crate::scoring::rank::{passes_filter, sort_funds};
use crate::scoring::{score_fund, score_stock};

/// Asset classes a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetScope {
    All,
    Stocks,
    Funds,
}

impl AssetScope {
    fn stocks(self) -> bool {
        matches!(self, Self::All | Self::Stocks)
    }

    fn funds(self) -> bool {
        matches!(self, Self::All | Self::Funds)
    }
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct Screening {
    /// The single rate every asset in this run was scored against.
    pub rate: BenchmarkRate,
    pub economy: Economy,
    pub stocks: Vec<ScoredStock>,
    pub funds: Vec<ScoredFund>,
}

impl Screening {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty() && self.funds.is_empty()
    }
}

/// Output of phase 1.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub rate: BenchmarkRate,
    pub economy: Economy,
    /// Selected, categorized stocks.
    pub stocks: Vec<ScoredStock>,
    /// Fund records kept for enrichment and the final pass.
    pub fund_candidates: Vec<RawFundRecord>,
}

impl Discovery {
    /// Tickers phase 2 must fetch: every fund candidate plus the top stocks.
    #[must_use]
    pub fn enrichment_targets(&self, top_stocks: usize) -> Vec<Ticker> {
        self.fund_candidates
            .iter()
            .map(|f| f.ticker.clone())
            .chain(self.stocks.iter().take(top_stocks).map(|s| s.raw.ticker.clone()))
            .collect()
    }
}

pub struct Reconciler {
    stocks: Option<Arc<dyn StockSource>>,
    funds: Vec<Arc<dyn FundSource>>,
    metadata: Arc<dyn MetadataSource>,
    economy: Arc<dyn EconomySource>,
    screening: ScreeningConfig,
    policy: EnrichmentPolicy,
    top_stocks: usize,
}

impl Reconciler {
    pub fn new(
        stocks: Option<Arc<dyn StockSource>>,
        funds: Vec<Arc<dyn FundSource>>,
        metadata: Arc<dyn MetadataSource>,
        economy: Arc<dyn EconomySource>,
    ) -> Self {
        Self {
            stocks,
            funds,
            metadata,
            economy,
            screening: ScreeningConfig::default(),
            policy: EnrichmentPolicy::default(),
            top_stocks: 0,
        }
    }

    #[must_use]
    pub fn with_screening(mut self, screening: ScreeningConfig) -> Self {
        self.screening = screening;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: EnrichmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enrich the first `count` ranked stocks for dividend display data.
    #[must_use]
    pub fn with_top_stocks(mut self, count: usize) -> Self {
        self.top_stocks = count;
        self
    }

    /// Run all three phases for every asset class.
    pub async fn run(&self) -> Screening {
        self.run_scoped(AssetScope::All).await
    }

    pub async fn run_stocks(&self) -> Screening {
        self.run_scoped(AssetScope::Stocks).await
    }

    pub async fn run_funds(&self) -> Screening {
        self.run_scoped(AssetScope::Funds).await
    }

    pub async fn run_scoped(&self, scope: AssetScope) -> Screening {
        let discovery = self.discover(scope).await;
        let targets = discovery.enrichment_targets(self.top_stocks);
        let enrichments = self.enrich(&targets).await;
        self.rescore(discovery, &enrichments)
    }

    /// Phase 1: concurrent discovery and rate lookup, first-pass scoring.
    ///
    /// A failing source contributes nothing; the run goes on.
    pub async fn discover(&self, scope: AssetScope) -> Discovery {
        let stocks = async {
            match (&self.stocks, scope.stocks()) {
                (Some(source), true) => source.fetch_stocks().await.unwrap_or_else(|e| {
                    warn!(source = source.source_name(), error = %e, "Stock discovery failed");
                    Vec::new()
                }),
                _ => Vec::new(),
            }
        };
        let funds = async {
            if !scope.funds() {
                return Vec::new();
            }
            join_all(self.funds.iter().map(|source| async move {
                source.fetch_funds().await.unwrap_or_else(|e| {
                    warn!(source = source.source_name(), error = %e, "Fund discovery failed");
                    Vec::new()
                })
            }))
            .await
        };

        let (stocks, fund_batches, selic, dollar) =
            tokio::join!(stocks, funds, self.economy.selic(), self.economy.dollar());

        let selic = match selic {
            Ok(selic) => Some(selic),
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = self.screening.fallback_selic,
                    "Benchmark rate unavailable"
                );
                None
            }
        };
        let dollar = match dollar {
            Ok(dollar) => Some(dollar),
            Err(e) => {
                warn!(error = %e, "Dollar quote unavailable");
                None
            }
        };
        let rate = self.screening.rate(selic);
        let economy = Economy {
            dollar,
            selic: Some(rate.value()),
        };

        let stocks = self.first_pass_stocks(&stocks, rate);
        let fund_candidates = self.first_pass_funds(merge_funds(fund_batches), rate);

        info!(
            rate = rate.value(),
            stocks = stocks.len(),
            fund_candidates = fund_candidates.len(),
            "Discovery finished"
        );

        Discovery {
            rate,
            economy,
            stocks,
            fund_candidates,
        }
    }

    /// Phase 2: fetch metadata for each target exactly once.
    pub async fn enrich(&self, tickers: &[Ticker]) -> Enrichments {
        Enricher::new(Arc::clone(&self.metadata), self.policy)
            .enrich_all(tickers)
            .await
    }

    /// Phase 3: final scoring with enrichment and the shared rate.
    #[must_use]
    pub fn rescore(&self, discovery: Discovery, enrichments: &Enrichments) -> Screening {
        let rate = discovery.rate;

        let mut funds: Vec<ScoredFund> = discovery
            .fund_candidates
            .iter()
            .map(|raw| score_fund(raw, Some(enrichments.get(&raw.ticker)), rate))
            .filter(|fund| passes_filter(fund, self.screening.final_min_score))
            .collect();
        sort_funds(&mut funds);

        let stocks = discovery
            .stocks
            .into_iter()
            .map(|stock| ScoredStock {
                dividend: DividendInfo::from_enrichment(enrichments.get(&stock.raw.ticker)),
                ..stock
            })
            .collect::<Vec<_>>();

        info!(stocks = stocks.len(), funds = funds.len(), "Screening finished");

        Screening {
            rate,
            economy: discovery.economy,
            stocks,
            funds,
        }
    }

    fn first_pass_stocks(&self, raw: &[RawStockRecord], rate: BenchmarkRate) -> Vec<ScoredStock> {
        let selection = self.screening.stock_selection();
        let scored = raw
            .iter()
            .map(RawStockRecord::sanitized)
            .filter(|s| selection.is_liquid(s.liquidity_2m))
            .map(|s| score_stock(&s, rate))
            .collect();
        selection.select(scored)
    }

    /// Keep funds worth a metadata request. Listing-only records (no price)
    /// cannot be judged yet and are always kept.
    fn first_pass_funds(
        &self,
        funds: Vec<RawFundRecord>,
        rate: BenchmarkRate,
    ) -> Vec<RawFundRecord> {
        let threshold = self.screening.first_pass_min_score;
        funds
            .into_iter()
            .filter(|raw| {
                raw.price <= 0.0 || passes_filter(&score_fund(raw, None, rate), threshold)
            })
            .collect()
    }
}

/// Merge fund batches by ticker. The first source to report a ticker wins;
/// later sources only fill its gaps. Discovery order is kept.
#[must_use]
pub fn merge_funds(batches: Vec<Vec<RawFundRecord>>) -> Vec<RawFundRecord> {
    let mut merged: Vec<RawFundRecord> = Vec::new();
    let mut index: HashMap<Ticker, usize> = HashMap::new();

    for record in batches.into_iter().flatten() {
        let record = record.sanitized();
        if record.ticker.is_empty() {
            continue;
        }
        match index.get(&record.ticker) {
            Some(&i) => merged[i].fill_missing(&record),
            None => {
                index.insert(record.ticker.clone(), merged.len());
                merged.push(record);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_first_source_wins() {
        let fundamentus = RawFundRecord {
            segment: "Logística".into(),
            price: 100.0,
            dividend_yield: 9.0,
            ..RawFundRecord::new("HGLG11")
        };
        let listing = RawFundRecord {
            segment: "Infraestrutura".into(),
            liquidity: 2_000_000.0,
            price: 90.0,
            ..RawFundRecord::new("HGLG11")
        };
        let other = RawFundRecord::new("CDII11");

        let merged = merge_funds(vec![vec![fundamentus], vec![listing, other]]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].segment, "Logística");
        assert_eq!(merged[0].price, 100.0);
        assert_eq!(merged[0].liquidity, 2_000_000.0);
        assert_eq!(merged[1].ticker.as_str(), "CDII11");
    }

    #[test]
    fn test_enrichment_targets_include_top_stocks() {
        let stock = score_stock(
            &RawStockRecord {
                price: 10.0,
                liquidity_2m: 1_000_000.0,
                ..RawStockRecord::new("PETR4")
            },
            BenchmarkRate::default(),
        );
        let discovery = Discovery {
            rate: BenchmarkRate::default(),
            economy: Economy::default(),
            stocks: vec![stock],
            fund_candidates: vec![RawFundRecord::new("KNCA11")],
        };

        assert_eq!(discovery.enrichment_targets(0).len(), 1);
        let targets = discovery.enrichment_targets(5);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].as_str(), "PETR4");
    }
}
