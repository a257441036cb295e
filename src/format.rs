//! Display formatting for prices, volumes and instrument names.
//!
//! Pure functions with no state; the renderers call them per entry.

use chrono::{DateTime, Local, Utc};

use crate::models::{QUOTE_PREFIX, QUOTE_SUFFIX};

/// Glyph prefixed to every money amount.
pub const CURRENCY_GLYPH: &str = "฿";

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Logo image per base asset.
const LOGOS: &[(&str, &str)] = &[
    ("BTC", "https://assets.coingecko.com/coins/images/1/large/bitcoin.png"),
    ("ETH", "https://assets.coingecko.com/coins/images/279/large/ethereum.png"),
    ("USDT", "https://assets.coingecko.com/coins/images/325/large/Tether-logo.png"),
    ("BNB", "https://s2.coinmarketcap.com/static/img/coins/64x64/1839.png"),
    ("XRP", "https://assets.coingecko.com/coins/images/44/large/xrp-symbol-white-128.png"),
    ("ADA", "https://assets.coingecko.com/coins/images/975/large/cardano.png"),
    ("DOGE", "https://assets.coingecko.com/coins/images/5/large/dogecoin.png"),
    ("SOL", "https://assets.coingecko.com/coins/images/4128/large/solana.png"),
    ("AVAX", "https://assets.coingecko.com/coins/images/12559/large/coin-round-red.png"),
    ("MATIC", "https://assets.coingecko.com/coins/images/4713/large/matic-token-icon.png"),
    ("LINK", "https://assets.coingecko.com/coins/images/877/large/chainlink-new-logo.png"),
    ("DOT", "https://assets.coingecko.com/coins/images/12171/large/polkadot.png"),
    ("UNI", "https://assets.coingecko.com/coins/images/12504/large/uniswap-uni.png"),
    ("ATOM", "https://assets.coingecko.com/coins/images/1481/large/cosmos_hub.png"),
    ("LTC", "https://assets.coingecko.com/coins/images/2/large/litecoin.png"),
    ("TRX", "https://assets.coingecko.com/coins/images/1094/large/tron-logo.png"),
    ("XLM", "https://assets.coingecko.com/coins/images/100/large/Stellar_symbol_black_RGB.png"),
    ("NEAR", "https://assets.coingecko.com/coins/images/10365/large/near.jpg"),
    ("SUI", "https://s2.coinmarketcap.com/static/img/coins/64x64/25080.png"),
    ("AAVE", "https://assets.coingecko.com/coins/images/12645/large/AAVE.png"),
];

const PLACEHOLDER_LOGO: &str = "https://via.placeholder.com/48x48/333/fff?text=";

/// Formats a price: `M`/`K` suffixes above a thousand, six decimals below one.
pub fn format_price(value: f64) -> String {
    if value >= MILLION {
        format!("{CURRENCY_GLYPH}{:.2}M", value / MILLION)
    } else if value >= THOUSAND {
        format!("{CURRENCY_GLYPH}{:.2}K", value / THOUSAND)
    } else if value >= 1.0 {
        format!("{CURRENCY_GLYPH}{value:.2}")
    } else {
        format!("{CURRENCY_GLYPH}{value:.6}")
    }
}

/// Formats a volume: `B`/`M`/`K` suffixes, always two decimals.
pub fn format_volume(value: f64) -> String {
    if value >= BILLION {
        format!("{CURRENCY_GLYPH}{:.2}B", value / BILLION)
    } else if value >= MILLION {
        format!("{CURRENCY_GLYPH}{:.2}M", value / MILLION)
    } else if value >= THOUSAND {
        format!("{CURRENCY_GLYPH}{:.2}K", value / THOUSAND)
    } else {
        format!("{CURRENCY_GLYPH}{value:.2}")
    }
}

/// Formats a percent change with an explicit sign for non-negative values.
pub fn format_change(percent: f64) -> String {
    if percent >= 0.0 {
        format!("+{percent:.2}%")
    } else {
        format!("{percent:.2}%")
    }
}

/// Strips the quote marker from an instrument id: the prefix if present,
/// otherwise the suffix.
pub fn parse_instrument_base(id: &str) -> &str {
    if let Some(base) = id.strip_prefix(QUOTE_PREFIX) {
        base
    } else {
        id.strip_suffix(QUOTE_SUFFIX).unwrap_or(id)
    }
}

/// Logo URL for a base asset, or a lettered placeholder.
pub fn logo_url(base: &str) -> String {
    LOGOS
        .iter()
        .find(|(code, _)| *code == base)
        .map(|(_, url)| (*url).to_string())
        .unwrap_or_else(|| format!("{PLACEHOLDER_LOGO}{base}"))
}

/// Local wall-clock time, `HH:MM:SS`.
pub fn format_clock(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%H:%M:%S").to_string()
}
