//! Central Bank SGS series for the Selic and AwesomeAPI for the dollar.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::http::HttpClient;
use super::parse::parse_br_number;
use crate::error::{Result, SourceError};
use crate::port::EconomySource;

const SOURCE: &str = "bcb";

/// SGS series 432 is the Selic target rate.
const SELIC_SERIES: &str = "bcdata.sgs.432";

#[derive(Debug, Deserialize)]
struct SeriesPoint {
    #[allow(dead_code)]
    data: String,
    valor: String,
}

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "USDBRL")]
    usd_brl: Quote,
}

#[derive(Debug, Deserialize)]
struct Quote {
    bid: String,
}

pub struct CentralBank {
    http: HttpClient,
    sgs_url: String,
    dollar_url: String,
}

impl CentralBank {
    pub fn new(http: HttpClient, sgs_base_url: &str, dollar_url: &str) -> Self {
        Self {
            http,
            sgs_url: format!(
                "{}/{}/dados/ultimos/1?formato=json",
                sgs_base_url.trim_end_matches('/'),
                SELIC_SERIES
            ),
            dollar_url: dollar_url.to_string(),
        }
    }
}

#[async_trait]
impl EconomySource for CentralBank {
    async fn selic(&self) -> Result<f64> {
        let points: Vec<SeriesPoint> = self.http.get_json(SOURCE, &self.sgs_url).await?;
        let selic = latest_value(&points)?;
        debug!(selic, "Fetched Selic");
        Ok(selic)
    }

    async fn dollar(&self) -> Result<f64> {
        let envelope: QuoteEnvelope = self.http.get_json(SOURCE, &self.dollar_url).await?;
        positive(parse_decimal(&envelope.usd_brl.bid), "USDBRL bid")
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

fn latest_value(points: &[SeriesPoint]) -> Result<f64> {
    let point = points.last().ok_or(SourceError::Empty {
        source_name: SOURCE,
    })?;
    positive(parse_decimal(&point.valor), "series value")
}

/// SGS answers `"10.75"` but older dumps use `"10,75"`.
fn parse_decimal(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => parse_br_number(text),
    }
}

fn positive(value: f64, what: &str) -> Result<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SourceError::Malformed {
            source_name: SOURCE,
            reason: format!("non-positive {what}"),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selic_series_value_is_string() {
        let points: Vec<SeriesPoint> =
            serde_json::from_str(r#"[{"data":"17/10/2026","valor":"10.75"}]"#).unwrap();
        assert_eq!(latest_value(&points).unwrap(), 10.75);
    }

    #[test]
    fn test_empty_series_is_error() {
        assert!(latest_value(&[]).is_err());
    }

    #[test]
    fn test_decimal_comma_fallback() {
        assert_eq!(parse_decimal("5,12"), 5.12);
        assert_eq!(parse_decimal("5.1234"), 5.1234);
    }

    #[test]
    fn test_dollar_envelope() {
        let envelope: QuoteEnvelope =
            serde_json::from_str(r#"{"USDBRL":{"code":"USD","bid":"5.4312"}}"#).unwrap();
        assert_eq!(parse_decimal(&envelope.usd_brl.bid), 5.4312);
    }
}
