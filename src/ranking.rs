//! Ranked views over a market snapshot.
//!
//! Every view is rebuilt from scratch per snapshot. Instruments whose sort
//! key is missing or unparseable are left out rather than ranked as zero.
//! Sorting is stable, so equal keys keep snapshot (instrument id) order.

use std::cmp::Ordering;

use crate::models::{Instrument, MarketSnapshot, Ticker};

/// An instrument paired with the ticker it was ranked by.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedEntry {
    pub instrument: Instrument,
    pub ticker: Ticker,
}

/// An ordered top-K list.
pub type RankedView = Vec<RankedEntry>;

/// The three views shown on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RankingKind {
    #[default]
    Volume,
    Gainers,
    Losers,
}

impl RankingKind {
    pub const ALL: [RankingKind; 3] = [RankingKind::Volume, RankingKind::Gainers, RankingKind::Losers];

    /// Short label for tabs.
    pub fn label(&self) -> &'static str {
        match self {
            RankingKind::Volume => "Volume",
            RankingKind::Gainers => "Gainers",
            RankingKind::Losers => "Losers",
        }
    }

    /// Section heading, e.g. "Top 10 by Volume".
    pub fn title(&self, k: usize) -> String {
        match self {
            RankingKind::Volume => format!("Top {k} by Volume"),
            RankingKind::Gainers => format!("Top {k} Gainers"),
            RankingKind::Losers => format!("Top {k} Losers"),
        }
    }

    /// Computes this view over `snapshot`.
    pub fn rank(&self, snapshot: &MarketSnapshot, k: usize) -> RankedView {
        match self {
            RankingKind::Volume => top_by_volume(snapshot, k),
            RankingKind::Gainers => top_gainers(snapshot, k),
            RankingKind::Losers => top_losers(snapshot, k),
        }
    }
}

/// All three views derived from the same snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankedViews {
    pub by_volume: RankedView,
    pub gainers: RankedView,
    pub losers: RankedView,
}

impl RankedViews {
    pub fn compute(snapshot: &MarketSnapshot, k: usize) -> Self {
        Self {
            by_volume: top_by_volume(snapshot, k),
            gainers: top_gainers(snapshot, k),
            losers: top_losers(snapshot, k),
        }
    }

    pub fn get(&self, kind: RankingKind) -> &RankedView {
        match kind {
            RankingKind::Volume => &self.by_volume,
            RankingKind::Gainers => &self.gainers,
            RankingKind::Losers => &self.losers,
        }
    }
}

/// Highest 24h quote volume first.
pub fn top_by_volume(snapshot: &MarketSnapshot, k: usize) -> RankedView {
    rank_by(snapshot, k, |t| t.quote_volume, |a, b| b.total_cmp(&a))
}

/// Largest 24h percent change first.
pub fn top_gainers(snapshot: &MarketSnapshot, k: usize) -> RankedView {
    rank_by(snapshot, k, |t| t.percent_change, |a, b| b.total_cmp(&a))
}

/// Smallest 24h percent change first.
pub fn top_losers(snapshot: &MarketSnapshot, k: usize) -> RankedView {
    rank_by(snapshot, k, |t| t.percent_change, |a, b| a.total_cmp(&b))
}

fn rank_by<K, C>(snapshot: &MarketSnapshot, k: usize, key: K, cmp: C) -> RankedView
where
    K: Fn(&Ticker) -> Option<f64>,
    C: Fn(f64, f64) -> Ordering,
{
    let mut keyed: Vec<(f64, RankedEntry)> = snapshot
        .iter()
        .filter(|(instrument, _)| instrument.is_quote_prefixed())
        .filter_map(|(instrument, ticker)| {
            key(ticker).map(|value| {
                (
                    value,
                    RankedEntry {
                        instrument: instrument.clone(),
                        ticker: *ticker,
                    },
                )
            })
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| cmp(*a, *b));
    keyed.truncate(k);
    keyed.into_iter().map(|(_, entry)| entry).collect()
}
