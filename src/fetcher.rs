//! Read-only access to the exchange's market endpoints.
//!
//! [`MarketSource`] is the seam between the refresh loop and the network:
//! [`BitkubClient`] talks to the real REST API, tests plug in scripted
//! sources. Neither retries; the scheduler owns retry timing.

use std::future::Future;

use chrono::Utc;
use tracing::debug;

use crate::Result;
use crate::config::ExchangeConfig;
use crate::models::{MarketData, MarketSnapshot, SymbolInfo, parse_symbols, parse_ticker};

const SYMBOLS_PATH: &str = "/api/market/symbols";
const TICKER_PATH: &str = "/api/market/ticker";

/// A provider of market listings and ticker snapshots.
pub trait MarketSource: Send + Sync + 'static {
    /// Returns the quote-prefixed markets currently listed.
    fn fetch_symbols(&self) -> impl Future<Output = Result<Vec<SymbolInfo>>> + Send;

    /// Returns the current ticker for every instrument.
    fn fetch_ticker(&self) -> impl Future<Output = Result<MarketSnapshot>> + Send;
}

/// Performs the I/O half of one refresh cycle.
///
/// Both endpoints are queried concurrently. If either call fails the whole
/// cycle fails and neither result is returned.
///
/// # Errors
///
/// Returns the first error produced by either call.
pub async fn fetch_market<S: MarketSource>(source: &S) -> Result<MarketData> {
    let (markets, snapshot) = tokio::try_join!(source.fetch_symbols(), source.fetch_ticker())?;
    Ok(MarketData { markets, snapshot })
}

/// HTTP client for the Bitkub public market API.
pub struct BitkubClient {
    client: reqwest::Client,
    symbols_url: String,
    ticker_url: String,
}

impl BitkubClient {
    /// Builds a client for the given exchange settings.
    ///
    /// # Errors
    ///
    /// Returns [`TickerboardError::Tls`](crate::TickerboardError::Tls) if the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &ExchangeConfig, tls_config: rustls::ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .use_preconfigured_tls(tls_config)
            .timeout(config.request_timeout)
            .user_agent(concat!("tickerboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| crate::TickerboardError::Tls(format!("failed to build HTTP client: {e}")))?;

        let base = config.base_url.trim_end_matches('/');
        Ok(Self {
            client,
            symbols_url: format!("{base}{SYMBOLS_PATH}"),
            ticker_url: format!("{base}{TICKER_PATH}"),
        })
    }

    pub fn symbols_url(&self) -> &str {
        &self.symbols_url
    }

    pub fn ticker_url(&self) -> &str {
        &self.ticker_url
    }

    /// GETs `url` and returns the raw body of a 2xx response.
    async fn get_body(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.bytes().await?;
        debug!(url, bytes = body.len(), "Fetched response body");
        Ok(body.to_vec())
    }
}

impl MarketSource for BitkubClient {
    async fn fetch_symbols(&self) -> Result<Vec<SymbolInfo>> {
        let body = self.get_body(&self.symbols_url).await?;
        parse_symbols(&body)
    }

    async fn fetch_ticker(&self) -> Result<MarketSnapshot> {
        let body = self.get_body(&self.ticker_url).await?;
        parse_ticker(&body, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn endpoint_urls_are_joined_without_double_slash() {
        let config = ExchangeConfig {
            base_url: "https://api.example.com/".to_string(),
            ca_bundle: None,
            request_timeout: Duration::from_secs(1),
        };
        let tls = crate::tls::build_tls_config(None).unwrap();
        let client = BitkubClient::new(&config, tls).unwrap();

        assert_eq!(
            client.symbols_url(),
            "https://api.example.com/api/market/symbols"
        );
        assert_eq!(
            client.ticker_url(),
            "https://api.example.com/api/market/ticker"
        );
    }
}
