//! Shared HTTP client with browser-like headers.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ConfigError, Result, SourceError};

/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Build a client sending `user_agent` and giving up after `timeout`.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,\
                 application/json;q=0.8,*/*;q=0.7",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7"),
        );

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// GET a page body, failing on non-success statuses.
    pub async fn get_text(
        &self,
        source_name: &'static str,
        url: &str,
        referer: Option<&str>,
    ) -> Result<String> {
        debug!(source = source_name, url = %url, "GET");
        let mut request = self.client.get(url);
        if let Some(referer) = referer {
            request = request.header(reqwest::header::REFERER, referer);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                source_name,
                status: status.as_u16(),
            }
            .into());
        }
        Ok(response.text().await?)
    }

    /// GET and decode a JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        source_name: &'static str,
        url: &str,
    ) -> Result<T> {
        let body = self.get_text(source_name, url, None).await?;
        serde_json::from_str(&body).map_err(|e| {
            SourceError::Malformed {
                source_name,
                reason: e.to_string(),
            }
            .into()
        })
    }
}
