//! Investidor10: per-ticker metadata, dividend history, fund listings and
//! Tesouro Direto offers.

mod page;

pub use page::{parse_asset_page, parse_dividend_history, parse_listing, parse_treasury};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::http::HttpClient;
use crate::domain::{DividendEvent, EnrichmentRecord, RawFundRecord, Ticker, TreasuryBond};
use crate::error::{Error, Result, SourceError};
use crate::port::{DividendHistorySource, FundSource, MetadataSource, TreasurySource};

const SOURCE: &str = "investidor10";
const LISTINGS_SOURCE: &str = "investidor10-listings";

const STOCK_PATHS: &[&str] = &["acoes"];
const FUND_PATHS: &[&str] = &["fiis", "fiagros", "fi-infra"];

/// Listing sections and the segment label their funds receive.
const LISTINGS: &[(&str, &str)] = &[("fiagros", "Fiagro"), ("fi-infra", "Infraestrutura")];

/// Page probing client for one ticker at a time.
pub struct Investidor10 {
    http: HttpClient,
    base_url: String,
}

impl Investidor10 {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn paths(ticker: &Ticker) -> &'static [&'static str] {
        if ticker.is_fund() {
            FUND_PATHS
        } else {
            STOCK_PATHS
        }
    }

    fn referer(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// Fetch the asset page under `path`. `Ok(None)` when the page does not exist.
    async fn page(&self, path: &str, ticker: &Ticker) -> Result<Option<String>> {
        let url = format!(
            "{}/{}/{}/",
            self.base_url,
            path,
            ticker.as_str().to_lowercase()
        );
        match self.http.get_text(SOURCE, &url, Some(&self.referer())).await {
            Ok(html) => Ok(Some(html)),
            Err(Error::Source(SourceError::Status { status, .. }))
                if status == 404 || status == 403 =>
            {
                debug!(ticker = %ticker, path, status, "No page");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl MetadataSource for Investidor10 {
    /// Probes each candidate section until one yields a conclusive record.
    async fn fetch_metadata(&self, ticker: &Ticker) -> Result<EnrichmentRecord> {
        let mut answered = false;
        let mut last_error = None;

        for path in Self::paths(ticker) {
            match self.page(path, ticker).await {
                Ok(Some(html)) => {
                    answered = true;
                    let record = parse_asset_page(ticker, &html)?;
                    if record.is_conclusive() {
                        return Ok(record);
                    }
                }
                Ok(None) => answered = true,
                Err(e) => {
                    warn!(ticker = %ticker, path, error = %e, "Metadata request failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !answered => Err(e),
            _ => Ok(EnrichmentRecord::empty(ticker.clone())),
        }
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

#[async_trait]
impl DividendHistorySource for Investidor10 {
    async fn fetch_history(&self, ticker: &Ticker) -> Result<Vec<DividendEvent>> {
        for path in Self::paths(ticker) {
            let Some(html) = self.page(path, ticker).await? else {
                continue;
            };
            let events = parse_dividend_history(&html)?;
            if !events.is_empty() {
                return Ok(events);
            }
        }
        Ok(Vec::new())
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

#[async_trait]
impl TreasurySource for Investidor10 {
    async fn fetch_bonds(&self) -> Result<Vec<TreasuryBond>> {
        let url = format!("{}/tesouro-direto/", self.base_url);
        let html = self.http.get_text(SOURCE, &url, Some(&self.referer())).await?;
        let bonds = parse_treasury(&html)?;
        info!(source = SOURCE, count = bonds.len(), "Fetched treasury bonds");
        Ok(bonds)
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

/// Fiagro and infrastructure fund listings, which Fundamentus omits.
pub struct Investidor10Listings {
    http: HttpClient,
    base_url: String,
}

impl Investidor10Listings {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl FundSource for Investidor10Listings {
    /// Records carry only the ticker and a segment label; enrichment fills
    /// the valuation later. A failing section is skipped.
    async fn fetch_funds(&self) -> Result<Vec<RawFundRecord>> {
        let referer = format!("{}/", self.base_url);
        let mut funds = Vec::new();

        for (section, segment) in LISTINGS {
            let url = format!("{}/{}/", self.base_url, section);
            let html = match self.http.get_text(LISTINGS_SOURCE, &url, Some(&referer)).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(section, error = %e, "Listing unavailable");
                    continue;
                }
            };

            let tickers = parse_listing(&html, section)?;
            debug!(section, count = tickers.len(), "Listed funds");
            funds.extend(tickers.into_iter().map(|ticker| RawFundRecord {
                segment: (*segment).to_string(),
                ..RawFundRecord::new(ticker)
            }));
        }

        info!(source = LISTINGS_SOURCE, count = funds.len(), "Fetched listings");
        Ok(funds)
    }

    fn source_name(&self) -> &'static str {
        LISTINGS_SOURCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_paths_by_ticker_kind() {
        assert_eq!(Investidor10::paths(&Ticker::from("PETR4")), &["acoes"]);
        assert_eq!(
            Investidor10::paths(&Ticker::from("HGLG11")),
            &["fiis", "fiagros", "fi-infra"]
        );
    }
}
