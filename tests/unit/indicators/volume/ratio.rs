//! Unit tests for volume ratio

use crate::fixtures::{bars_from_closes, bars_with_volumes, rising};
use pause::indicators::volume::{calculate_volume_ratio, calculate_volume_ratio_default};

#[test]
fn test_volume_ratio_against_average() {
    let mut volumes = vec![1000.0; 19];
    volumes.push(3000.0);
    let bars = bars_with_volumes(&rising(10.0, 20), &volumes);
    let ratio = calculate_volume_ratio_default(&bars).unwrap();
    assert!((ratio - 3000.0 / 1100.0 * 100.0).abs() < 1e-9, "ratio = {}", ratio);
}

#[test]
fn test_volume_ratio_constant_volume_is_100() {
    let bars = bars_from_closes(&rising(10.0, 25), 500.0);
    assert_eq!(calculate_volume_ratio_default(&bars), Some(100.0));
}

#[test]
fn test_volume_ratio_insufficient_history() {
    let bars = bars_from_closes(&rising(10.0, 6), 1000.0);
    assert!(calculate_volume_ratio_default(&bars).is_none());
}

#[test]
fn test_volume_ratio_zero_average() {
    let bars = bars_from_closes(&rising(10.0, 20), 0.0);
    assert!(calculate_volume_ratio(&bars, 20).is_none());
}
