//! Bitkub market board.
//!
//! Polls the exchange's public REST endpoints on a fixed interval, keeps a
//! short rolling price history per trading pair, and derives three ranked
//! views (top by volume, top gainers, top losers) for a terminal dashboard
//! or a plain-text report.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod history;
pub mod models;
pub mod ranking;
pub mod report;
pub mod scheduler;
pub mod tls;
pub mod tui;

pub use error::{Result, TickerboardError};
