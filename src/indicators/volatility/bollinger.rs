//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::BollingerBands;
use crate::models::market::PriceBar;

pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * sample standard deviation)
/// Lower Band = Middle - (std_dev * sample standard deviation)
pub fn calculate_bollinger_bands(
    bars: &[PriceBar],
    period: usize,
    std_dev: f64,
) -> Option<BollingerBands> {
    if bars.len() < period {
        return None;
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let middle = math::sma(&closes, period)?;
    let std = math::standard_deviation(&closes, period)?;

    Some(BollingerBands {
        upper: middle + (std_dev * std),
        middle,
        lower: middle - (std_dev * std),
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(bars: &[PriceBar]) -> Option<BollingerBands> {
    calculate_bollinger_bands(bars, BOLLINGER_PERIOD, BOLLINGER_STD_DEV)
}
