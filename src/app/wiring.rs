//! Source construction from configuration.

use std::sync::Arc;

use tracing::{debug, info};

use super::config::Config;
use super::reconcile::Reconciler;
use crate::adapter::{
    BrapiStocks, CentralBank, FailoverStockSource, FundamentusFunds, FundamentusStocks,
    HttpClient, Investidor10, Investidor10Listings,
};
use crate::error::Result;
use crate::port::{
    DividendHistorySource, EconomySource, FundSource, MetadataSource, StockSource, TreasurySource,
};

/// Every collaborator a run needs.
#[derive(Clone)]
pub struct Sources {
    pub stocks: Arc<dyn StockSource>,
    pub funds: Vec<Arc<dyn FundSource>>,
    pub metadata: Arc<dyn MetadataSource>,
    pub history: Arc<dyn DividendHistorySource>,
    pub treasury: Arc<dyn TreasurySource>,
    pub economy: Arc<dyn EconomySource>,
}

impl Sources {
    /// Wire the public web sources.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &Config) -> Result<Self> {
        let sources = &config.sources;
        let http = HttpClient::new(&sources.user_agent, sources.timeout())?;
        // Per-ticker calls are bounded by the enrichment timeout instead.
        let slow_http = HttpClient::new(&sources.user_agent, config.enrichment.policy().timeout)?;

        let brapi = BrapiStocks::new(http.clone(), &sources.brapi_url, sources.brapi_token.clone());
        if sources.brapi_token.is_none() {
            debug!("BRAPI_TOKEN not set, fallback source limited to public quotes");
        }
        let stocks = FailoverStockSource::pair(
            Arc::new(FundamentusStocks::new(http.clone(), &sources.fundamentus_url)),
            Arc::new(brapi),
        );

        let investidor10 = Arc::new(Investidor10::new(slow_http, &sources.investidor10_url));
        let funds: Vec<Arc<dyn FundSource>> = vec![
            Arc::new(FundamentusFunds::new(http.clone(), &sources.fundamentus_url)),
            Arc::new(Investidor10Listings::new(http.clone(), &sources.investidor10_url)),
        ];
        info!(fund_sources = funds.len(), "Sources initialized");

        Ok(Self {
            stocks: Arc::new(stocks),
            funds,
            metadata: investidor10.clone(),
            history: investidor10.clone(),
            treasury: investidor10,
            economy: Arc::new(CentralBank::new(http, &sources.bcb_sgs_url, &sources.dollar_url)),
        })
    }

    /// Reconciler over these sources with the configured thresholds.
    #[must_use]
    pub fn reconciler(&self, config: &Config) -> Reconciler {
        Reconciler::new(
            Some(Arc::clone(&self.stocks)),
            self.funds.clone(),
            Arc::clone(&self.metadata),
            Arc::clone(&self.economy),
        )
        .with_screening(config.screening.clone())
        .with_policy(config.enrichment.policy())
        .with_top_stocks(config.enrichment.top_stocks)
    }
}
