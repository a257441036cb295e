//! Models for the Bitkub public market REST API.
//!
//! Contains the instrument identifier type, the symbols and ticker payloads,
//! and the snapshot built from one ticker fetch.

pub mod instrument;
pub mod snapshot;
pub mod symbol;
pub mod ticker;

pub use instrument::{Instrument, QUOTE_PREFIX, QUOTE_SUFFIX};
pub use snapshot::{MarketData, MarketSnapshot, parse_ticker};
pub use symbol::{SymbolInfo, SymbolsResponse, parse_symbols};
pub use ticker::{Ticker, coerce_f64};
