//! Unit tests for Stochastic %K

use crate::fixtures::{bars_from_closes, day, rising};
use pause::indicators::momentum::{calculate_stochastic_k, calculate_stochastic_k_default};
use pause::models::market::PriceBar;

#[test]
fn test_stochastic_insufficient_data() {
    let bars = bars_from_closes(&rising(1.0, 13), 1000.0);
    assert!(calculate_stochastic_k_default(&bars).is_none());
}

#[test]
fn test_stochastic_position_in_range() {
    // lowest 1, highest 13, close 8
    let mut closes = rising(1.0, 13);
    closes.push(8.0);
    let bars = bars_from_closes(&closes, 1000.0);
    let k = calculate_stochastic_k_default(&bars).unwrap();
    assert!((k - 700.0 / 12.0).abs() < 1e-9, "k = {}", k);
}

#[test]
fn test_stochastic_window_includes_latest_bar() {
    let bars = bars_from_closes(&rising(1.0, 14), 1000.0);
    assert_eq!(calculate_stochastic_k_default(&bars), Some(100.0));
}

#[test]
fn test_stochastic_uses_highs_and_lows() {
    let bars: Vec<PriceBar> = (0..3)
        .map(|i| PriceBar::new(10.0, 12.0, 8.0, 10.0, 1000.0, day(i)))
        .collect();
    assert_eq!(calculate_stochastic_k(&bars, 3), Some(50.0));
}

#[test]
fn test_stochastic_flat_range_is_undefined() {
    let bars = bars_from_closes(&[25.0; 20], 1000.0);
    assert!(calculate_stochastic_k_default(&bars).is_none());
}
