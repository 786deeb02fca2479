use serde::{Deserialize, Serialize};

use crate::indicators::trend::classify_trend;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "BULLISH",
            Trend::Bearish => "BEARISH",
        }
    }
}

/// Indicator values at the latest bar of a series.
///
/// Always fully populated: indicators without enough history carry their
/// neutral fallback instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub price: f64,
    pub rsi14: f64,
    pub bb_lower: f64,
    pub bb_middle: f64,
    pub bb_upper: f64,
    pub ema5: f64,
    pub stoch_k14: f64,
    pub volume_ratio_pct: f64,
    pub is_up_candle: bool,
}

impl IndicatorSnapshot {
    /// Snapshot where every indicator sits at its fallback for `price`.
    pub fn neutral(price: f64) -> Self {
        Self {
            price,
            rsi14: 50.0,
            bb_lower: price * 0.95,
            bb_middle: price,
            bb_upper: price * 1.05,
            ema5: price,
            stoch_k14: 50.0,
            volume_ratio_pct: 100.0,
            is_up_candle: true,
        }
    }

    pub fn trend(&self) -> Trend {
        classify_trend(self.price, self.ema5)
    }
}
