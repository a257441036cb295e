//! Trading pair identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quote currency marker used in the quote-first form (`THB_BTC`).
pub const QUOTE_PREFIX: &str = "THB_";

/// Quote currency marker used in the quote-last form (`BTC_THB`).
pub const QUOTE_SUFFIX: &str = "_THB";

/// One tradeable pair identifier as the exchange spells it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instrument(String);

impl Instrument {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier uses the quote-first form and not the
    /// quote-last one. Pairs listed both ways are only counted once.
    pub fn is_quote_prefixed(&self) -> bool {
        self.0.starts_with(QUOTE_PREFIX) && !self.0.contains(QUOTE_SUFFIX)
    }

    /// The base asset code (`BTC` for `THB_BTC` and for `BTC_THB`).
    pub fn base(&self) -> &str {
        crate::format::parse_instrument_base(&self.0)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Instrument {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for Instrument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
