//! Rolling-window arithmetic used by the indicator functions.
//!
//! Every helper works on the trailing `period` values of the slice and
//! returns `None` when there is not enough history or the result would not
//! be a finite number.

/// Simple moving average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    let window = trailing(values, period)?;
    if let Some(value) = flat(window) {
        return finite(value);
    }
    finite(window.iter().sum::<f64>() / period as f64)
}

/// Sample standard deviation (n - 1 denominator) of the last `period` values.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    if period < 2 {
        return None;
    }
    let window = trailing(values, period)?;
    if flat(window).is_some() {
        return Some(0.0);
    }
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / (period - 1) as f64;
    finite(variance.sqrt())
}

/// Exponential moving average with smoothing `2 / (period + 1)`.
///
/// Seeded by the first value of the slice, no bias adjustment.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 {
        return None;
    }
    let (first, rest) = values.split_first()?;
    let alpha = 2.0 / (period as f64 + 1.0);
    let value = rest
        .iter()
        .fold(*first, |acc, v| alpha * v + (1.0 - alpha) * acc);
    finite(value)
}

/// Lowest value over the last `period` entries.
pub fn rolling_min(values: &[f64], period: usize) -> Option<f64> {
    let window = trailing(values, period)?;
    finite(window.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Highest value over the last `period` entries.
pub fn rolling_max(values: &[f64], period: usize) -> Option<f64> {
    let window = trailing(values, period)?;
    finite(window.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

fn trailing(values: &[f64], period: usize) -> Option<&[f64]> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(&values[values.len() - period..])
}

/// The shared value when every entry in the window is identical.
fn flat(window: &[f64]) -> Option<f64> {
    let (first, rest) = window.split_first()?;
    rest.iter().all(|v| v == first).then_some(*first)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
