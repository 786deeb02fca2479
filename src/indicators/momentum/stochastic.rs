//! Stochastic Oscillator %K

use crate::common::math;
use crate::models::market::PriceBar;

pub const STOCHASTIC_PERIOD: usize = 14;

/// %K = 100 * (close - lowest low) / (highest high - lowest low)
///
/// The window includes the latest bar. A flat range has no defined %K and
/// yields `None`.
pub fn calculate_stochastic_k(bars: &[PriceBar], period: usize) -> Option<f64> {
    if bars.len() < period {
        return None;
    }

    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lowest = math::rolling_min(&lows, period)?;
    let highest = math::rolling_max(&highs, period)?;
    let range = highest - lowest;

    if range == 0.0 {
        return None;
    }

    let close = bars.last()?.close;
    let k = 100.0 * (close - lowest) / range;
    k.is_finite().then_some(k)
}

pub fn calculate_stochastic_k_default(bars: &[PriceBar]) -> Option<f64> {
    calculate_stochastic_k(bars, STOCHASTIC_PERIOD)
}
