//! Ticker (`/api/market/ticker`) models.
//!
//! The exchange sends numbers either as JSON numbers or as strings, and
//! occasionally as `null`. Every numeric field goes through [`coerce_f64`].

use serde::{Deserialize, Deserializer};

/// 24h statistics for one instrument.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Ticker {
    /// Last traded price; `0.0` when absent or unparseable.
    #[serde(default, deserialize_with = "zero_if_missing")]
    pub last: f64,
    #[serde(rename = "high24hr", default, deserialize_with = "zero_if_missing")]
    pub high_24hr: f64,
    #[serde(rename = "low24hr", default, deserialize_with = "zero_if_missing")]
    pub low_24hr: f64,
    /// 24h volume in the quote currency. `None` excludes the instrument
    /// from the volume ranking.
    #[serde(rename = "quoteVolume", default, deserialize_with = "loose_f64")]
    pub quote_volume: Option<f64>,
    /// 24h change in percent. `None` excludes the instrument from the
    /// gainers and losers rankings.
    #[serde(rename = "percentChange", default, deserialize_with = "loose_f64")]
    pub percent_change: Option<f64>,
}

impl Ticker {
    /// Percent change for display, treating a missing value as flat.
    pub fn change_or_zero(&self) -> f64 {
        self.percent_change.unwrap_or(0.0)
    }
}

/// Coerces a loosely-typed JSON value to a finite float.
///
/// Accepts numbers and numeric strings (surrounding whitespace allowed).
/// Everything else, including `NaN` and infinities, yields `None`.
pub fn coerce_f64(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn loose_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

fn zero_if_missing<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_f64(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn coerces_numbers_and_strings() {
        assert_eq!(coerce_f64(&json!(1.5)), Some(1.5));
        assert_eq!(coerce_f64(&json!(42)), Some(42.0));
        assert_eq!(coerce_f64(&json!("2.25")), Some(2.25));
        assert_eq!(coerce_f64(&json!(" -1.0 ")), Some(-1.0));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_eq!(coerce_f64(&json!(null)), None);
        assert_eq!(coerce_f64(&json!("")), None);
        assert_eq!(coerce_f64(&json!("abc")), None);
        assert_eq!(coerce_f64(&json!("NaN")), None);
        assert_eq!(coerce_f64(&json!("inf")), None);
        assert_eq!(coerce_f64(&json!(true)), None);
        assert_eq!(coerce_f64(&json!([1])), None);
    }

    #[test]
    fn price_fields_default_to_zero() {
        let ticker: Ticker =
            serde_json::from_value(json!({ "last": "oops", "high24hr": null })).unwrap();
        assert_eq!(ticker.last, 0.0);
        assert_eq!(ticker.high_24hr, 0.0);
        assert_eq!(ticker.low_24hr, 0.0);
        assert_eq!(ticker.quote_volume, None);
        assert_eq!(ticker.percent_change, None);
        assert_eq!(ticker.change_or_zero(), 0.0);
    }
}
