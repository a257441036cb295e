//! Market listing (`/api/market/symbols`) models.

use serde::Deserialize;
use tracing::debug;

use super::instrument::Instrument;
use crate::Result;

/// Envelope returned by the symbols endpoint.
#[derive(Debug, Deserialize)]
pub struct SymbolsResponse {
    /// Zero on success. Missing means the body is not a success reply.
    #[serde(default)]
    pub error: Option<i64>,
    #[serde(default)]
    pub result: Vec<SymbolInfo>,
}

/// A listed market.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SymbolInfo {
    #[serde(default)]
    pub id: u64,
    pub symbol: Instrument,
    /// Human description, e.g. "Thai Baht to Bitcoin".
    #[serde(default)]
    pub info: String,
}

/// Parses a symbols response body and keeps only quote-prefixed markets.
///
/// # Errors
///
/// - [`TickerboardError::Parse`](crate::TickerboardError::Parse) if the body
///   is not the expected JSON.
/// - [`TickerboardError::Api`](crate::TickerboardError::Api) if `error` is
///   missing or non-zero.
pub fn parse_symbols(body: &[u8]) -> Result<Vec<SymbolInfo>> {
    let response: SymbolsResponse = serde_json::from_slice(body)?;

    match response.error {
        Some(0) => {}
        code => return Err(crate::TickerboardError::Api { code }),
    }

    let total = response.result.len();
    let markets: Vec<SymbolInfo> = response
        .result
        .into_iter()
        .filter(|s| s.symbol.is_quote_prefixed())
        .collect();
    debug!(total, kept = markets.len(), "Filtered market listing");

    Ok(markets)
}
