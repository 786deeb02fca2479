//! Unit tests for the indicator registry

use pause::indicators::registry::{IndicatorCategory, IndicatorKind};
use std::collections::HashSet;

#[test]
fn test_every_indicator_is_registered_once() {
    let all = IndicatorKind::all();
    let names: HashSet<&str> = all.iter().map(|k| k.name()).collect();
    assert_eq!(all.len(), 5);
    assert_eq!(names.len(), all.len());
}

#[test]
fn test_categories() {
    assert_eq!(IndicatorKind::Rsi.category(), IndicatorCategory::Momentum);
    assert_eq!(IndicatorKind::StochasticK.category(), IndicatorCategory::Momentum);
    assert_eq!(IndicatorKind::Ema.category(), IndicatorCategory::Trend);
    assert_eq!(IndicatorKind::Bollinger.category(), IndicatorCategory::Volatility);
    assert_eq!(IndicatorKind::VolumeRatio.category(), IndicatorCategory::Volume);
}

#[test]
fn test_every_indicator_documents_a_fallback() {
    for kind in IndicatorKind::all() {
        assert!(!kind.fallback().is_empty(), "{:?}", kind);
    }
}
