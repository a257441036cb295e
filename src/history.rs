//! Rolling per-instrument price history.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};

use crate::models::{Instrument, MarketSnapshot};

/// One price sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryPoint {
    pub time: DateTime<Utc>,
    pub price: f64,
}

/// Bounded FIFO of recent prices for every instrument seen so far.
///
/// Series only ever grow by [`record`](Self::record) and lose their oldest
/// points once they exceed the window. Instruments missing from later
/// snapshots keep their series unchanged.
#[derive(Clone, Debug)]
pub struct PriceHistory {
    window: usize,
    series: HashMap<Instrument, VecDeque<HistoryPoint>>,
}

impl PriceHistory {
    /// Creates an empty history keeping at most `window` points per
    /// instrument. A zero window is raised to one.
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            series: HashMap::new(),
        }
    }

    /// Appends the last price of every instrument in `snapshot` at `now`.
    ///
    /// No deduplication: recording the same snapshot twice adds two points.
    pub fn record(&mut self, snapshot: &MarketSnapshot, now: DateTime<Utc>) {
        for (instrument, ticker) in snapshot.iter() {
            let points = self
                .series
                .entry(instrument.clone())
                .or_insert_with(|| VecDeque::with_capacity(self.window));
            points.push_back(HistoryPoint {
                time: now,
                price: ticker.last,
            });
            while points.len() > self.window {
                points.pop_front();
            }
        }
    }

    /// Points for `instrument`, oldest first.
    pub fn series(&self, instrument: &Instrument) -> Option<&VecDeque<HistoryPoint>> {
        self.series.get(instrument)
    }

    /// Prices for `instrument`, oldest first; empty if never seen.
    pub fn prices(&self, instrument: &Instrument) -> Vec<f64> {
        self.series
            .get(instrument)
            .map(|points| points.iter().map(|p| p.price).collect())
            .unwrap_or_default()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of instruments with at least one point.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new(crate::config::RefreshConfig::default().history_window)
    }
}
