mod common;

use serde_json::json;

use tickerboard::models::MarketSnapshot;
use tickerboard::ranking::{
    RankedView, RankedViews, RankingKind, top_by_volume, top_gainers, top_losers,
};

use common::{btc_eth, snapshot};

fn ids(view: &RankedView) -> Vec<&str> {
    view.iter().map(|e| e.instrument.as_str()).collect()
}

#[test]
fn two_instrument_scenario_with_k_of_one() {
    let snap = btc_eth();

    assert_eq!(ids(&top_by_volume(&snap, 1)), vec!["THB_ETH"]);
    assert_eq!(ids(&top_gainers(&snap, 1)), vec!["THB_BTC"]);
    assert_eq!(ids(&top_losers(&snap, 1)), vec!["THB_ETH"]);
}

fn wide_market() -> MarketSnapshot {
    snapshot(json!({
        "THB_A": { "last": "1", "quoteVolume": "500", "percentChange": "3" },
        "THB_B": { "last": "1", "quoteVolume": "20",  "percentChange": "-7.5" },
        "THB_C": { "last": "1", "quoteVolume": 9000,  "percentChange": 12 },
        "THB_D": { "last": "1", "quoteVolume": "0.5", "percentChange": "0" },
        "THB_E": { "last": "1", "quoteVolume": "75",  "percentChange": "-0.25" },
        "THB_F": { "last": "1" },
        "THB_G": { "last": "1", "quoteVolume": "abc", "percentChange": null }
    }))
}

#[test]
fn views_are_bounded_and_sorted() {
    let snap = wide_market();

    for k in [0, 1, 3, 10] {
        let by_volume = top_by_volume(&snap, k);
        assert!(by_volume.len() <= k);
        assert!(by_volume.iter().all(|e| e.ticker.quote_volume.is_some()));
        assert!(by_volume.windows(2).all(|w| {
            w[0].ticker.quote_volume.unwrap() >= w[1].ticker.quote_volume.unwrap()
        }));

        let gainers = top_gainers(&snap, k);
        assert!(gainers.windows(2).all(|w| {
            w[0].ticker.percent_change.unwrap() >= w[1].ticker.percent_change.unwrap()
        }));

        let losers = top_losers(&snap, k);
        assert!(losers.windows(2).all(|w| {
            w[0].ticker.percent_change.unwrap() <= w[1].ticker.percent_change.unwrap()
        }));
    }
}

#[test]
fn full_orderings() {
    let snap = wide_market();

    assert_eq!(
        ids(&top_by_volume(&snap, 10)),
        vec!["THB_C", "THB_A", "THB_E", "THB_B", "THB_D"]
    );
    assert_eq!(
        ids(&top_gainers(&snap, 10)),
        vec!["THB_C", "THB_A", "THB_D", "THB_E", "THB_B"]
    );
    assert_eq!(
        ids(&top_losers(&snap, 10)),
        vec!["THB_B", "THB_E", "THB_D", "THB_A", "THB_C"]
    );
}

#[test]
fn missing_sort_keys_are_excluded_not_zeroed() {
    let snap = wide_market();
    let views = RankedViews::compute(&snap, 10);

    for kind in RankingKind::ALL {
        let view = views.get(kind);
        assert!(!ids(view).contains(&"THB_F"), "{kind:?} ranked THB_F");
        assert!(!ids(view).contains(&"THB_G"), "{kind:?} ranked THB_G");
    }
    assert!(
        views
            .gainers
            .iter()
            .chain(views.losers.iter())
            .all(|e| e.ticker.percent_change.is_some())
    );
}

#[test]
fn quote_suffixed_pairs_are_not_ranked() {
    let snap = snapshot(json!({
        "THB_BTC": { "quoteVolume": "10", "percentChange": "1" },
        "BTC_THB": { "quoteVolume": "99", "percentChange": "9" }
    }));

    assert_eq!(ids(&top_by_volume(&snap, 10)), vec!["THB_BTC"]);
    assert_eq!(ids(&top_gainers(&snap, 10)), vec!["THB_BTC"]);
}

#[test]
fn ties_keep_instrument_order() {
    let snap = snapshot(json!({
        "THB_ZIL": { "quoteVolume": "10", "percentChange": "1" },
        "THB_ADA": { "quoteVolume": "10", "percentChange": "1" },
        "THB_KUB": { "quoteVolume": "10", "percentChange": "1" }
    }));

    let expected = vec!["THB_ADA", "THB_KUB", "THB_ZIL"];
    assert_eq!(ids(&top_by_volume(&snap, 10)), expected);
    assert_eq!(ids(&top_gainers(&snap, 10)), expected);
    assert_eq!(ids(&top_losers(&snap, 10)), expected);
}

#[test]
fn empty_snapshot_gives_empty_views() {
    let views = RankedViews::compute(&MarketSnapshot::default(), 10);
    assert_eq!(views, RankedViews::default());
}

#[test]
fn kind_titles() {
    assert_eq!(RankingKind::Volume.title(10), "Top 10 by Volume");
    assert_eq!(RankingKind::Gainers.title(5), "Top 5 Gainers");
    assert_eq!(RankingKind::Losers.title(10), "Top 10 Losers");
    assert_eq!(
        ids(&RankingKind::Losers.rank(&btc_eth(), 10)),
        vec!["THB_ETH", "THB_BTC"]
    );
}
