mod common;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use tickerboard::TickerboardError;
use tickerboard::error::ErrorKind;
use tickerboard::models::{Instrument, parse_symbols, parse_ticker};

use common::ts;

#[test]
fn symbols_keep_only_quote_prefixed_markets() {
    let body = br#"{
        "error": 0,
        "result": [
            { "id": 1, "symbol": "THB_BTC", "info": "Thai Baht to Bitcoin" },
            { "id": 2, "symbol": "BTC_THB", "info": "Bitcoin to Thai Baht" },
            { "id": 3, "symbol": "THB_ETH", "info": "Thai Baht to Ethereum" },
            { "id": 4, "symbol": "USDT_BTC" }
        ]
    }"#;

    let markets = assert_ok!(parse_symbols(body));

    let ids: Vec<&str> = markets.iter().map(|m| m.symbol.as_str()).collect();
    assert_eq!(ids, vec!["THB_BTC", "THB_ETH"]);
    assert_eq!(markets[0].id, 1);
    assert_eq!(markets[0].info, "Thai Baht to Bitcoin");
}

#[test]
fn symbols_with_nonzero_error_code_fail() {
    let err = assert_err!(parse_symbols(br#"{ "error": 5, "result": [] }"#));
    assert!(matches!(err, TickerboardError::Api { code: Some(5) }));
    assert_eq!(err.kind(), ErrorKind::Logical);
}

#[test]
fn symbols_without_error_field_fail() {
    let err = assert_err!(parse_symbols(br#"{ "result": [] }"#));
    assert!(matches!(err, TickerboardError::Api { code: None }));
}

#[test]
fn symbols_with_garbage_body_fail_to_parse() {
    let err = assert_err!(parse_symbols(b"<html>502 Bad Gateway</html>"));
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn ticker_coerces_loose_numbers() {
    let body = serde_json::to_vec(&json!({
        "THB_BTC": {
            "id": 1,
            "last": "2100000.5",
            "high24hr": 2150000,
            "low24hr": "2000000",
            "quoteVolume": "123456789.12",
            "percentChange": 1.25
        },
        "THB_DOGE": {
            "last": "not a number",
            "quoteVolume": null,
            "percentChange": ""
        }
    }))
    .unwrap();

    let snapshot = assert_ok!(parse_ticker(&body, ts(0)));
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.captured_at, ts(0));

    let btc = snapshot.get(&Instrument::from("THB_BTC")).unwrap();
    assert_eq!(btc.last, 2_100_000.5);
    assert_eq!(btc.high_24hr, 2_150_000.0);
    assert_eq!(btc.low_24hr, 2_000_000.0);
    assert_eq!(btc.quote_volume, Some(123_456_789.12));
    assert_eq!(btc.percent_change, Some(1.25));

    let doge = snapshot.get(&Instrument::from("THB_DOGE")).unwrap();
    assert_eq!(doge.last, 0.0);
    assert_eq!(doge.quote_volume, None);
    assert_eq!(doge.percent_change, None);
}

#[test]
fn ticker_skips_non_object_entries() {
    let body = br#"{ "THB_BTC": { "last": "1" }, "note": "maintenance", "error": 0 }"#;

    let snapshot = assert_ok!(parse_ticker(body, ts(0)));
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.get(&Instrument::from("THB_BTC")).is_some());
}

#[test]
fn ticker_with_embedded_error_fails() {
    let err = assert_err!(parse_ticker(br#"{ "error": 2 }"#, ts(0)));
    assert!(matches!(err, TickerboardError::Api { code: Some(2) }));
}

#[test]
fn ticker_must_be_an_object() {
    let err = assert_err!(parse_ticker(b"[1, 2, 3]", ts(0)));
    assert!(matches!(err, TickerboardError::Malformed(_)));
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn ticker_iterates_in_instrument_order() {
    let body = br#"{ "THB_XRP": {}, "THB_ADA": {}, "THB_BTC": {} }"#;

    let snapshot = assert_ok!(parse_ticker(body, ts(0)));
    let ids: Vec<&str> = snapshot.iter().map(|(i, _)| i.as_str()).collect();
    assert_eq!(ids, vec!["THB_ADA", "THB_BTC", "THB_XRP"]);
}
