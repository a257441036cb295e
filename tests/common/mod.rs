//! Shared test utilities: snapshot builders and a scripted market source.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Notify;

use tickerboard::config::RefreshConfig;
use tickerboard::fetcher::MarketSource;
use tickerboard::models::{Instrument, MarketSnapshot, SymbolInfo, parse_ticker};
use tickerboard::{Result, TickerboardError};

/// Bitkub REST API base URL.
pub const BITKUB_API_URL: &str = "https://api.bitkub.com";

/// Builds a snapshot from a ticker-endpoint-shaped JSON value.
pub fn snapshot(value: serde_json::Value) -> MarketSnapshot {
    let body = serde_json::to_vec(&value).expect("serialize fixture");
    parse_ticker(&body, ts(0)).expect("fixture parses")
}

/// A fixed timestamp `secs` seconds after an arbitrary epoch.
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0)
        .single()
        .expect("valid timestamp")
}

pub fn market(id: u64, symbol: &str, info: &str) -> SymbolInfo {
    SymbolInfo {
        id,
        symbol: Instrument::from(symbol),
        info: info.to_string(),
    }
}

/// The two-instrument market used across scenarios.
pub fn btc_eth() -> MarketSnapshot {
    snapshot(serde_json::json!({
        "THB_BTC": { "last": "1000000", "quoteVolume": "50", "percentChange": "2.5" },
        "THB_ETH": { "last": "50000", "quoteVolume": "100", "percentChange": "-1.0" }
    }))
}

pub fn refresh_config(interval: Duration) -> RefreshConfig {
    RefreshConfig {
        poll_interval: interval,
        history_window: 20,
        top_k: 10,
    }
}

/// Replays scripted results; once a script runs dry every call fails.
pub struct ScriptedSource {
    symbols: Mutex<VecDeque<Result<Vec<SymbolInfo>>>>,
    tickers: Mutex<VecDeque<Result<MarketSnapshot>>>,
    ticker_calls: Arc<AtomicUsize>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            symbols: Mutex::new(VecDeque::new()),
            tickers: Mutex::new(VecDeque::new()),
            ticker_calls: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    /// Queues the results of one refresh cycle.
    pub fn cycle(
        self,
        symbols: Result<Vec<SymbolInfo>>,
        ticker: Result<MarketSnapshot>,
    ) -> Self {
        self.symbols
            .lock()
            .expect("symbols lock")
            .push_back(symbols);
        self.tickers.lock().expect("tickers lock").push_back(ticker);
        self
    }

    /// Makes every ticker call wait for a permit on `gate`.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Counter of ticker calls, readable after the source is moved.
    pub fn ticker_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.ticker_calls)
    }
}

fn exhausted() -> TickerboardError {
    TickerboardError::Malformed("script exhausted".to_string())
}

impl MarketSource for ScriptedSource {
    async fn fetch_symbols(&self) -> Result<Vec<SymbolInfo>> {
        let next = self.symbols.lock().expect("symbols lock").pop_front();
        next.unwrap_or_else(|| Err(exhausted()))
    }

    async fn fetch_ticker(&self) -> Result<MarketSnapshot> {
        self.ticker_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.tickers.lock().expect("tickers lock").pop_front();
        next.unwrap_or_else(|| Err(exhausted()))
    }
}
