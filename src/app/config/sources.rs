//! Upstream endpoints and HTTP client settings.

use std::time::Duration;

use serde::Deserialize;

/// Base URLs of every data source.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_fundamentus_url")]
    pub fundamentus_url: String,
    #[serde(default = "default_brapi_url")]
    pub brapi_url: String,
    #[serde(default = "default_investidor10_url")]
    pub investidor10_url: String,
    #[serde(default = "default_bcb_sgs_url")]
    pub bcb_sgs_url: String,
    #[serde(default = "default_dollar_url")]
    pub dollar_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout for the bulk sources.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Read from `BRAPI_TOKEN`, never from the file.
    #[serde(skip)]
    pub brapi_token: Option<String>,
}

impl SourcesConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            fundamentus_url: default_fundamentus_url(),
            brapi_url: default_brapi_url(),
            investidor10_url: default_investidor10_url(),
            bcb_sgs_url: default_bcb_sgs_url(),
            dollar_url: default_dollar_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            brapi_token: None,
        }
    }
}

fn default_fundamentus_url() -> String {
    "https://www.fundamentus.com.br".into()
}

fn default_brapi_url() -> String {
    "https://brapi.dev/api".into()
}

fn default_investidor10_url() -> String {
    "https://investidor10.com.br".into()
}

fn default_bcb_sgs_url() -> String {
    "https://api.bcb.gov.br/dados/serie".into()
}

fn default_dollar_url() -> String {
    "https://economia.awesomeapi.com.br/last/USD-BRL".into()
}

fn default_user_agent() -> String {
    concat!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
        "(KHTML, like Gecko) Chrome/124.0 Safari/537.36",
    )
    .into()
}

const fn default_timeout_secs() -> u64 {
    10
}
