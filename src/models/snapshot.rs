//! Point-in-time view of every ticker.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::instrument::Instrument;
use super::symbol::SymbolInfo;
use super::ticker::Ticker;
use crate::Result;

/// All tickers captured by one fetch.
///
/// Immutable once built; the next fetch replaces it wholesale. Iteration
/// follows instrument id order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarketSnapshot {
    pub captured_at: DateTime<Utc>,
    pub tickers: BTreeMap<Instrument, Ticker>,
}

impl MarketSnapshot {
    pub fn new(captured_at: DateTime<Utc>, tickers: BTreeMap<Instrument, Ticker>) -> Self {
        Self {
            captured_at,
            tickers,
        }
    }

    pub fn get(&self, instrument: &Instrument) -> Option<&Ticker> {
        self.tickers.get(instrument)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Instrument, &Ticker)> {
        self.tickers.iter()
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

/// The I/O result of one refresh cycle: both endpoints, applied together.
#[derive(Clone, Debug)]
pub struct MarketData {
    pub markets: Vec<SymbolInfo>,
    pub snapshot: MarketSnapshot,
}

/// Parses a ticker response body into a snapshot.
///
/// Entries that are not JSON objects are skipped. Bad numeric fields inside
/// an entry are coerced, never fatal.
///
/// # Errors
///
/// - [`TickerboardError::Parse`](crate::TickerboardError::Parse) if the body
///   is not JSON.
/// - [`TickerboardError::Malformed`](crate::TickerboardError::Malformed) if
///   the top level is not an object.
/// - [`TickerboardError::Api`](crate::TickerboardError::Api) if the body
///   carries a non-zero integer `error` field.
pub fn parse_ticker(body: &[u8], captured_at: DateTime<Utc>) -> Result<MarketSnapshot> {
    let value: serde_json::Value = serde_json::from_slice(body)?;

    let serde_json::Value::Object(entries) = value else {
        return Err(crate::TickerboardError::Malformed(
            "ticker response is not a JSON object".into(),
        ));
    };

    if let Some(code) = entries.get("error").and_then(serde_json::Value::as_i64)
        && code != 0
    {
        return Err(crate::TickerboardError::Api { code: Some(code) });
    }

    let mut tickers = BTreeMap::new();
    for (id, entry) in entries {
        if !entry.is_object() {
            debug!(id = %id, "Skipping non-object ticker entry");
            continue;
        }
        let ticker: Ticker = serde_json::from_value(entry)?;
        tickers.insert(Instrument::new(id), ticker);
    }

    Ok(MarketSnapshot::new(captured_at, tickers))
}
