//! Volume ratio: latest volume relative to its moving average

use crate::common::math;
use crate::models::market::PriceBar;

pub const VOLUME_PERIOD: usize = 20;

/// Latest volume / SMA(period) of volume * 100. The average includes the
/// latest bar; a zero average yields `None`.
pub fn calculate_volume_ratio(bars: &[PriceBar], period: usize) -> Option<f64> {
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    let average = math::sma(&volumes, period)?;
    if average <= 0.0 {
        return None;
    }
    let ratio = bars.last()?.volume / average * 100.0;
    ratio.is_finite().then_some(ratio)
}

pub fn calculate_volume_ratio_default(bars: &[PriceBar]) -> Option<f64> {
    calculate_volume_ratio(bars, VOLUME_PERIOD)
}
