//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::market::PriceBar;

pub const RSI_PERIOD: usize = 14;

/// Calculate RSI over the trailing `period` close-to-close deltas
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss, both simple averages.
///
/// Returns `None` with fewer than `period + 1` bars or when the average loss
/// is zero (RS undefined).
pub fn calculate_rsi(bars: &[PriceBar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period + 1 {
        return None;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = bars
        .windows(2)
        .map(|pair| {
            let change = pair[1].close - pair[0].close;
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            }
        })
        .unzip();

    let avg_gain = math::sma(&gains, period)?;
    let avg_loss = math::sma(&losses, period)?;

    if avg_loss == 0.0 {
        return None;
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));
    rsi.is_finite().then_some(rsi)
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(bars: &[PriceBar]) -> Option<f64> {
    calculate_rsi(bars, RSI_PERIOD)
}
