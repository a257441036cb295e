//! Application configuration loaded from environment variables.
//!
//! Every variable is optional; unset or empty values fall back to the
//! defaults below:
//! - `BITKUB_API_URL`: REST base URL (`https://api.bitkub.com`)
//! - `BITKUB_CA_BUNDLE`: extra PEM root certificates to trust
//! - `TICKERBOARD_POLL_INTERVAL_MS`: refresh period (`10000`)
//! - `TICKERBOARD_HISTORY_WINDOW`: price points kept per instrument (`20`)
//! - `TICKERBOARD_TOP_K`: entries per ranked view (`10`)
//! - `TICKERBOARD_REQUEST_TIMEOUT_MS`: per-request HTTP timeout (`8000`)
//! - `TICKERBOARD_LOG_FILE`: log destination while the TUI owns the screen

use std::path::PathBuf;
use std::time::Duration;

/// Default public REST endpoint.
const DEFAULT_API_URL: &str = "https://api.bitkub.com";

const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;
const DEFAULT_HISTORY_WINDOW: usize = 20;
const DEFAULT_TOP_K: usize = 10;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 8_000;
const DEFAULT_LOG_FILE: &str = "tickerboard.log";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub exchange: ExchangeConfig,
    pub refresh: RefreshConfig,
    pub log_file: PathBuf,
}

/// Exchange connection settings.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub ca_bundle: Option<PathBuf>,
    pub request_timeout: Duration,
}

/// Refresh-cycle tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Time between the starts of two fetch cycles.
    pub poll_interval: Duration,
    /// Maximum number of price points kept per instrument.
    pub history_window: usize,
    /// Maximum number of entries in each ranked view.
    pub top_k: usize,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            history_window: DEFAULT_HISTORY_WINDOW,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`TickerboardError::Config`](crate::TickerboardError::Config) if a
/// numeric variable is not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url = non_empty_var("BITKUB_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let ca_bundle = non_empty_var("BITKUB_CA_BUNDLE").map(PathBuf::from);

    let poll_interval_ms = positive_var("TICKERBOARD_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?;
    let history_window = positive_var("TICKERBOARD_HISTORY_WINDOW", DEFAULT_HISTORY_WINDOW as u64)?;
    let top_k = positive_var("TICKERBOARD_TOP_K", DEFAULT_TOP_K as u64)?;
    let request_timeout_ms =
        positive_var("TICKERBOARD_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;

    let log_file = non_empty_var("TICKERBOARD_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    Ok(AppConfig {
        exchange: ExchangeConfig {
            base_url,
            ca_bundle,
            request_timeout: Duration::from_millis(request_timeout_ms),
        },
        refresh: RefreshConfig {
            poll_interval: Duration::from_millis(poll_interval_ms),
            history_window: history_window as usize,
            top_k: top_k as usize,
        },
        log_file,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Reads a strictly positive integer variable, falling back to `default`.
fn positive_var(name: &str, default: u64) -> crate::Result<u64> {
    let Some(raw) = non_empty_var(name) else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(crate::TickerboardError::Config(format!(
            "{name} must be greater than zero"
        ))),
        Ok(value) => Ok(value),
        Err(e) => Err(crate::TickerboardError::Config(format!(
            "{name} is not a valid integer ({raw:?}): {e}"
        ))),
    }
}
