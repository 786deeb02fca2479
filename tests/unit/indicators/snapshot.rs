//! Unit tests for the indicator snapshot and its fallbacks

use crate::fixtures::{bars_from_closes, choppy_uptrend, day, rising, series};
use pause::indicators::registry::IndicatorKind;
use pause::indicators::snapshot::{compute_snapshot, compute_snapshot_report};
use pause::models::indicators::Trend;
use pause::models::market::{PriceBar, PriceSeries};

#[test]
fn test_short_history_rsi_is_exactly_neutral() {
    for len in 1..14 {
        let snapshot = compute_snapshot(&series("ACME", &rising(10.0, len)));
        assert_eq!(snapshot.rsi14, 50.0, "len = {}", len);
    }
}

#[test]
fn test_flat_closes_give_zero_width_bands() {
    let snapshot = compute_snapshot(&series("ACME", &[50.0; 20]));
    assert_eq!(snapshot.bb_upper, 50.0);
    assert_eq!(snapshot.bb_lower, 50.0);
    // no losses either, so RSI falls back
    assert_eq!(snapshot.rsi14, 50.0);
}

#[test]
fn test_flat_closes_collapse_bands_for_inexact_prices() {
    for price in [10.1, 0.3, 123.45, 0.07] {
        let snapshot = compute_snapshot(&series("ACME", &[price; 20]));
        assert_eq!(snapshot.bb_upper, price, "upper for {}", price);
        assert_eq!(snapshot.bb_lower, price, "lower for {}", price);
    }
}

#[test]
fn test_six_bar_history_uses_fallbacks_without_panicking() {
    let report = compute_snapshot_report(&series("ACME", &[10.0, 11.0, 9.0, 12.0, 13.0, 14.0]));
    let snapshot = report.snapshot;

    assert_eq!(snapshot.price, 14.0);
    assert_eq!(snapshot.rsi14, 50.0);
    assert!((snapshot.bb_lower - 14.0 * 0.95).abs() < 1e-9);
    assert!((snapshot.bb_upper - 14.0 * 1.05).abs() < 1e-9);
    assert_eq!(snapshot.stoch_k14, 50.0);
    assert_eq!(snapshot.volume_ratio_pct, 100.0);
    assert!((snapshot.ema5 - 12.263_374_485_6).abs() < 1e-9);
    assert_eq!(snapshot.trend(), Trend::Bullish);

    assert_eq!(
        report.degraded,
        vec![
            IndicatorKind::Rsi,
            IndicatorKind::Bollinger,
            IndicatorKind::StochasticK,
            IndicatorKind::VolumeRatio,
        ]
    );
}

#[test]
fn test_single_bar_snapshot_is_fully_populated() {
    let snapshot = compute_snapshot(&series("ACME", &[3.0]));
    for value in [
        snapshot.rsi14,
        snapshot.bb_lower,
        snapshot.bb_middle,
        snapshot.bb_upper,
        snapshot.ema5,
        snapshot.stoch_k14,
        snapshot.volume_ratio_pct,
    ] {
        assert!(value.is_finite() && value > 0.0);
    }
}

#[test]
fn test_full_history_has_no_fallbacks() {
    let mut closes = choppy_uptrend();
    closes.extend([108.0, 107.5, 109.0, 110.0, 109.5, 111.0]);
    let mut bars = bars_from_closes(&closes, 1000.0);
    // give the range some width and make the last bar an up candle
    for bar in bars.iter_mut() {
        bar.high = bar.close + 1.0;
        bar.low = bar.close - 1.0;
    }
    let last = bars.len() - 1;
    bars[last].open = 110.0;
    let report = compute_snapshot_report(&PriceSeries::new("ACME", bars).unwrap());

    assert!(report.degraded.is_empty(), "degraded: {:?}", report.degraded);
    assert!(report.snapshot.is_up_candle);
    assert!(report.snapshot.bb_lower < report.snapshot.bb_upper);
}

#[test]
fn test_bars_are_read_in_chronological_order() {
    let bars = vec![
        PriceBar::new(14.0, 14.0, 14.0, 14.0, 1000.0, day(5)),
        PriceBar::new(10.0, 10.0, 10.0, 10.0, 1000.0, day(0)),
    ];
    let snapshot = compute_snapshot(&PriceSeries::new("ACME", bars).unwrap());
    assert_eq!(snapshot.price, 14.0);
}

#[test]
fn test_down_candle() {
    let bars = vec![PriceBar::new(12.0, 12.5, 10.5, 11.0, 1000.0, day(0))];
    let snapshot = compute_snapshot(&PriceSeries::new("ACME", bars).unwrap());
    assert!(!snapshot.is_up_candle);
}
