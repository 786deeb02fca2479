//! Unit tests for EMA indicator

use crate::fixtures::bars_from_closes;
use pause::indicators::trend::{calculate_ema, calculate_ema_default, classify_trend};
use pause::models::indicators::Trend;

#[test]
fn test_ema_seeded_by_first_close() {
    let bars = bars_from_closes(&[42.0], 1000.0);
    assert_eq!(calculate_ema_default(&bars), Some(42.0));
}

#[test]
fn test_ema_smoothing() {
    let bars = bars_from_closes(&[10.0, 11.0, 9.0, 12.0, 13.0, 14.0], 1000.0);
    let ema = calculate_ema_default(&bars).unwrap();
    assert!((ema - 12.263_374_485_6).abs() < 1e-9, "ema = {}", ema);
}

#[test]
fn test_ema_constant_series() {
    let bars = bars_from_closes(&[7.5; 30], 1000.0);
    assert_eq!(calculate_ema(&bars, 5), Some(7.5));
}

#[test]
fn test_ema_empty_and_zero_period() {
    assert!(calculate_ema_default(&[]).is_none());
    let bars = bars_from_closes(&[1.0, 2.0], 1000.0);
    assert!(calculate_ema(&bars, 0).is_none());
}

#[test]
fn test_trend_classification() {
    assert_eq!(classify_trend(101.0, 100.0), Trend::Bullish);
    assert_eq!(classify_trend(100.0, 100.0), Trend::Bearish);
    assert_eq!(classify_trend(99.0, 100.0), Trend::Bearish);
}
