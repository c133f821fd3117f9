//! Error types for the orchestration core

use thiserror::Error;

/// Shown when the top-N list cannot be loaded
pub const LIST_LOAD_FAILED: &str = "Failed to fetch stock data. Please try again later.";
/// Shown when a detail view cannot load its price history
pub const HISTORY_LOAD_FAILED: &str = "Failed to fetch stock data. Please try again.";
/// Shown in the analysis panel when the analysis request fails
pub const ANALYSIS_FAILED: &str = "Failed to generate AI analysis. Please try again.";

/// Failure of a single request to the stock-data service
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network unreachable, connection refused, request rejected
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out: {0}")]
    Timeout(String),

    /// Non-2xx response
    #[error("{url} responded with status {status}")]
    Status { status: u16, url: String },

    /// Base URL that endpoint paths cannot be appended to
    #[error("invalid service url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Payload missing expected fields or not JSON at all
    #[error("malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            let target = error
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "unknown url".to_string());
            FetchError::Timeout(target)
        } else {
            FetchError::Transport(error)
        }
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// A (state, event) pair the detail pipeline does not allow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event} in state {state}")]
pub struct TransitionError {
    pub state: &'static str,
    pub event: &'static str,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{0}' (expected growth, volume or market_cap)")]
pub struct ParseSortKeyError(pub String);
