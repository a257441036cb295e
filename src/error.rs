//! Crate-level error types.
//!
//! [`TickerboardError`] unifies every error source (configuration, HTTP,
//! JSON, exchange status codes, terminal I/O) behind a single enum so callers
//! can match on the variant they care about while still using the `?`
//! operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TickerboardError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum TickerboardError {
    /// An environment variable held an invalid value.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request failed (DNS, connect, timeout, non-2xx status).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body was not valid JSON.
    #[error("json error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A response body was valid JSON but not of the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The exchange answered with a non-zero embedded status code.
    ///
    /// `None` means the status field was missing altogether.
    #[error("exchange returned error code {}", code.map_or_else(|| "<missing>".to_string(), |c| c.to_string()))]
    Api { code: Option<i64> },

    /// TLS configuration could not be built.
    #[error("tls error: {0}")]
    Tls(String),

    /// Terminal or task I/O failed.
    #[error("io error: {0}")]
    Io(String),
}

/// Coarse classification of a failed refresh cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network, DNS, timeout or HTTP status failure.
    Transport,
    /// The payload could not be understood.
    Parse,
    /// A well-formed payload that signals failure.
    Logical,
    /// Anything outside the refresh cycle (config, TLS, terminal).
    Local,
}

impl TickerboardError {
    /// Classifies the error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TickerboardError::Transport(_) => ErrorKind::Transport,
            TickerboardError::Parse(_) | TickerboardError::Malformed(_) => ErrorKind::Parse,
            TickerboardError::Api { .. } => ErrorKind::Logical,
            TickerboardError::Config(_) | TickerboardError::Tls(_) | TickerboardError::Io(_) => {
                ErrorKind::Local
            }
        }
    }
}
