//! Unit tests for RSI indicator

use crate::fixtures::{bars_from_closes, choppy_uptrend, rising};
use pause::indicators::momentum::{calculate_rsi, calculate_rsi_default, RSI_PERIOD};

#[test]
fn test_rsi_needs_period_plus_one_bars() {
    let bars = bars_from_closes(&choppy_uptrend()[..RSI_PERIOD], 1000.0);
    assert!(calculate_rsi_default(&bars).is_none());
}

#[test]
fn test_rsi_simple_average_of_gains_and_losses() {
    // seven +2 moves and seven -1 moves: RS = 1.0 / 0.5
    let bars = bars_from_closes(&choppy_uptrend(), 1000.0);
    let rsi = calculate_rsi_default(&bars).unwrap();
    assert!((rsi - 200.0 / 3.0).abs() < 1e-9, "rsi = {}", rsi);
}

#[test]
fn test_rsi_only_reads_trailing_window() {
    // A crash long before the window must not move the value.
    let mut closes = vec![500.0, 50.0];
    closes.extend(choppy_uptrend());
    let bars = bars_from_closes(&closes, 1000.0);
    let rsi = calculate_rsi_default(&bars).unwrap();
    assert!((rsi - 200.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_rsi_without_losses_is_undefined() {
    let bars = bars_from_closes(&rising(10.0, 30), 1000.0);
    assert!(calculate_rsi_default(&bars).is_none());
}

#[test]
fn test_rsi_all_losses_is_zero() {
    let closes: Vec<f64> = rising(10.0, 20).into_iter().rev().collect();
    let bars = bars_from_closes(&closes, 1000.0);
    assert_eq!(calculate_rsi(&bars, 14), Some(0.0));
}

#[test]
fn test_rsi_bounded() {
    let closes = [44.3, 44.1, 44.2, 43.6, 44.3, 44.8, 45.1, 45.4, 45.8, 46.1, 45.9, 46.2, 45.6, 46.3, 46.3, 46.0];
    let bars = bars_from_closes(&closes, 1000.0);
    let rsi = calculate_rsi_default(&bars).unwrap();
    assert!((0.0..=100.0).contains(&rsi));
}
