//! Fundamentus bulk tables: every listed stock and every listed FII.

use async_trait::async_trait;
use scraper::Html;
use tracing::info;

use super::http::HttpClient;
use super::parse::{parse_br_number, selector, text_of};
use crate::domain::{RawFundRecord, RawStockRecord, Ticker};
use crate::error::{Result, SourceError};
use crate::port::{FundSource, StockSource};

const STOCKS_SOURCE: &str = "fundamentus-stocks";
const FUNDS_SOURCE: &str = "fundamentus-fiis";

/// Stock table at `{base}/resultado.php`.
pub struct FundamentusStocks {
    http: HttpClient,
    url: String,
}

impl FundamentusStocks {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            url: format!("{}/resultado.php", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl StockSource for FundamentusStocks {
    async fn fetch_stocks(&self) -> Result<Vec<RawStockRecord>> {
        let html = self.http.get_text(STOCKS_SOURCE, &self.url, None).await?;
        let stocks = parse_stock_table(&html)?;
        if stocks.is_empty() {
            return Err(SourceError::Empty {
                source_name: STOCKS_SOURCE,
            }
            .into());
        }
        info!(source = STOCKS_SOURCE, count = stocks.len(), "Fetched stocks");
        Ok(stocks)
    }

    fn source_name(&self) -> &'static str {
        STOCKS_SOURCE
    }
}

/// FII table at `{base}/fii_resultado.php`.
pub struct FundamentusFunds {
    http: HttpClient,
    url: String,
}

impl FundamentusFunds {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            url: format!("{}/fii_resultado.php", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl FundSource for FundamentusFunds {
    async fn fetch_funds(&self) -> Result<Vec<RawFundRecord>> {
        let html = self.http.get_text(FUNDS_SOURCE, &self.url, None).await?;
        let funds = parse_fund_table(&html)?;
        info!(source = FUNDS_SOURCE, count = funds.len(), "Fetched funds");
        Ok(funds)
    }

    fn source_name(&self) -> &'static str {
        FUNDS_SOURCE
    }
}

/// Rows of `#resultado`, one record per row with a ticker.
pub fn parse_stock_table(html: &str) -> Result<Vec<RawStockRecord>> {
    let document = Html::parse_document(html);
    let rows = selector(STOCKS_SOURCE, "#resultado tbody tr")?;
    let cells = selector(STOCKS_SOURCE, "td")?;

    let stocks = document
        .select(&rows)
        .filter_map(|row| {
            let columns: Vec<String> = row.select(&cells).map(text_of).collect();
            let num = |i: usize| columns.get(i).map_or(0.0, |c| parse_br_number(c));

            let ticker = Ticker::new(columns.first()?);
            if ticker.is_empty() {
                return None;
            }

            let pe = num(2);
            let dividend_yield = num(5);
            // Payout in percent: DPS / EPS = (dy / 100 * price) / (price / pe).
            let payout = (pe > 0.0 && dividend_yield > 0.0).then_some(dividend_yield * pe);

            Some(RawStockRecord {
                ticker,
                price: num(1),
                pe,
                pb: num(3),
                psr: num(4),
                dividend_yield,
                ev_ebit: num(10),
                ebit_margin: num(12),
                net_margin: num(13),
                roic: num(15),
                roe: num(16),
                liquidity_2m: num(17),
                debt_to_equity: num(19),
                revenue_cagr_5y: num(20),
                payout,
            })
        })
        .collect();

    Ok(stocks)
}

/// Rows of `#tabelaResultado`.
pub fn parse_fund_table(html: &str) -> Result<Vec<RawFundRecord>> {
    let document = Html::parse_document(html);
    let rows = selector(FUNDS_SOURCE, "#tabelaResultado tbody tr")?;
    let cells = selector(FUNDS_SOURCE, "td")?;

    let funds = document
        .select(&rows)
        .filter_map(|row| {
            let columns: Vec<String> = row.select(&cells).map(text_of).collect();
            let num = |i: usize| columns.get(i).map_or(0.0, |c| parse_br_number(c));

            let ticker = Ticker::new(columns.first()?);
            if ticker.is_empty() {
                return None;
            }

            Some(RawFundRecord {
                ticker,
                segment: columns.get(1).cloned().unwrap_or_default(),
                price: num(2),
                ffo_yield: num(3),
                dividend_yield: num(4),
                pb: num(5),
                market_cap: num(6),
                liquidity: num(7),
                property_count: num(8),
                cap_rate: num(11),
                vacancy: num(12),
            })
        })
        .collect();

    Ok(funds)
}
