use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised by data sources before they are absorbed by the orchestrator.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{source_name} returned HTTP {status}")]
    Status { source_name: &'static str, status: u16 },

    #[error("{source_name} returned no usable rows")]
    Empty { source_name: &'static str },

    #[error("{source_name} has no data for {ticker}")]
    NotFound {
        source_name: &'static str,
        ticker: String,
    },

    #[error("{source_name} response could not be parsed: {reason}")]
    Malformed {
        source_name: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("no stocks and no funds were discovered; refusing to overwrite {0}")]
    NoData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
