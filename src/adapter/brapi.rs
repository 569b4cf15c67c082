//! brapi.dev REST API, used as the stock failover source.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::http::HttpClient;
use crate::domain::{RawStockRecord, Ticker};
use crate::error::{Result, SourceError};
use crate::port::StockSource;

const SOURCE: &str = "brapi";
/// Tickers per detail request; longer URLs are rejected.
const BATCH_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    stocks: Vec<ListedStock>,
}

#[derive(Debug, Deserialize)]
struct ListedStock {
    stock: String,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    results: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Quote {
    symbol: Option<String>,
    regular_market_price: Option<f64>,
    average_daily_volume10_day: Option<f64>,
    #[serde(default)]
    summary_profile: Fundamentals,
}

/// Ratios arrive as fractions (`0.12` for 12%).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fundamentals {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<f64>,
    price_to_book: Option<f64>,
    price_to_sales_trailing12_months: Option<f64>,
    dividend_yield: Option<f64>,
    enterprise_to_ebitda: Option<f64>,
    ebitda_margins: Option<f64>,
    profit_margins: Option<f64>,
    return_on_assets: Option<f64>,
    return_on_equity: Option<f64>,
    debt_to_equity: Option<f64>,
    earnings_quarterly_growth: Option<f64>,
}

pub struct BrapiStocks {
    http: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl BrapiStocks {
    /// `token` comes from the `BRAPI_TOKEN` environment variable.
    pub fn new(http: HttpClient, base_url: &str, token: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let mut url = url::Url::parse(&format!("{}/{}", self.base_url, path))?;
        if !query.is_empty() || self.token.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if let Some(token) = &self.token {
                pairs.append_pair("token", token);
            }
        }
        Ok(url.into())
    }
}

#[async_trait]
impl StockSource for BrapiStocks {
    async fn fetch_stocks(&self) -> Result<Vec<RawStockRecord>> {
        let list: ListResponse = self
            .http
            .get_json(SOURCE, &self.url("quote/list", &[])?)
            .await?;
        if list.stocks.is_empty() {
            return Err(SourceError::Empty {
                source_name: SOURCE,
            }
            .into());
        }

        let tickers = list
            .stocks
            .iter()
            .take(BATCH_LIMIT)
            .map(|s| s.stock.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let quotes: QuoteResponse = self
            .http
            .get_json(
                SOURCE,
                &self.url(&format!("quote/{tickers}"), &[("fundamental", "true")])?,
            )
            .await?;

        let stocks: Vec<RawStockRecord> =
            quotes.results.into_iter().filter_map(to_record).collect();
        info!(source = SOURCE, count = stocks.len(), "Fetched stocks");
        Ok(stocks)
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

fn to_record(quote: Quote) -> Option<RawStockRecord> {
    let ticker = Ticker::new(quote.symbol?);
    if ticker.is_empty() {
        return None;
    }
    let f = quote.summary_profile;
    let pct = |v: Option<f64>| v.unwrap_or(0.0) * 100.0;
    let raw = |v: Option<f64>| v.unwrap_or(0.0);

    // ROA stands in for ROIC and quarterly earnings growth for the 5y CAGR.
    Some(RawStockRecord {
        ticker,
        price: raw(quote.regular_market_price),
        pe: raw(f.trailing_pe),
        pb: raw(f.price_to_book),
        psr: raw(f.price_to_sales_trailing12_months),
        dividend_yield: pct(f.dividend_yield),
        ev_ebit: raw(f.enterprise_to_ebitda),
        ebit_margin: pct(f.ebitda_margins),
        net_margin: pct(f.profit_margins),
        roic: raw(f.return_on_assets),
        roe: pct(f.return_on_equity),
        liquidity_2m: raw(quote.average_daily_volume10_day),
        debt_to_equity: raw(f.debt_to_equity),
        revenue_cagr_5y: pct(f.earnings_quarterly_growth),
        payout: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_mapping_scales_fractions() {
        let body = r#"{"results":[{
            "symbol":"petr4",
            "regularMarketPrice":38.2,
            "averageDailyVolume10Day":1500000,
            "summaryProfile":{"trailingPE":4.5,"dividendYield":0.12,"returnOnEquity":0.25,"profitMargins":0.2}
        },{"regularMarketPrice":1.0}]}"#;
        let response: QuoteResponse = serde_json::from_str(body).unwrap();
        let records: Vec<_> = response.results.into_iter().filter_map(to_record).collect();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.ticker.as_str(), "PETR4");
        assert_eq!(r.price, 38.2);
        assert_eq!(r.pe, 4.5);
        assert!((r.dividend_yield - 12.0).abs() < 1e-9);
        assert!((r.roe - 25.0).abs() < 1e-9);
        assert_eq!(r.liquidity_2m, 1_500_000.0);
        assert!(r.payout.is_none());
    }

    #[test]
    fn test_url_carries_token() {
        let http = HttpClient::new("test", std::time::Duration::from_secs(1)).unwrap();
        let brapi = BrapiStocks::new(http, "https://brapi.dev/api/", Some("abc".into()));
        let url = brapi.url("quote/list", &[("fundamental", "true")]).unwrap();
        assert_eq!(url, "https://brapi.dev/api/quote/list?fundamental=true&token=abc");
    }
}
