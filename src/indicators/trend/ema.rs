//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::indicators::Trend;
use crate::models::market::PriceBar;

pub const EMA_PERIOD: usize = 5;

/// Calculate the EMA of closes for a specific period
///
/// Seeded by the first close of the series, so a single bar is enough.
pub fn calculate_ema(bars: &[PriceBar], period: usize) -> Option<f64> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    math::ema(&closes, period)
}

pub fn calculate_ema_default(bars: &[PriceBar]) -> Option<f64> {
    calculate_ema(bars, EMA_PERIOD)
}

/// Price above the EMA is bullish, anything else bearish
pub fn classify_trend(price: f64, ema: f64) -> Trend {
    if price > ema {
        Trend::Bullish
    } else {
        Trend::Bearish
    }
}
