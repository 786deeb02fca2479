//! Indicator identities and their documented fallbacks

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorCategory {
    Momentum,
    Trend,
    Volatility,
    Volume,
}

/// Every indicator in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Rsi,
    Bollinger,
    Ema,
    StochasticK,
    VolumeRatio,
}

impl IndicatorKind {
    /// Get the category this indicator belongs to
    pub fn category(&self) -> IndicatorCategory {
        match self {
            IndicatorKind::Rsi | IndicatorKind::StochasticK => IndicatorCategory::Momentum,
            IndicatorKind::Ema => IndicatorCategory::Trend,
            IndicatorKind::Bollinger => IndicatorCategory::Volatility,
            IndicatorKind::VolumeRatio => IndicatorCategory::Volume,
        }
    }

    /// Get the name of the indicator
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "rsi14",
            IndicatorKind::Bollinger => "bollinger20",
            IndicatorKind::Ema => "ema5",
            IndicatorKind::StochasticK => "stoch_k14",
            IndicatorKind::VolumeRatio => "volume_ratio20",
        }
    }

    /// Human-readable fallback applied when the indicator is degraded
    pub fn fallback(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "50 (neutral)",
            IndicatorKind::Bollinger => "price +/- 5%",
            IndicatorKind::Ema => "current price",
            IndicatorKind::StochasticK => "50 (neutral)",
            IndicatorKind::VolumeRatio => "100 (average)",
        }
    }

    /// Get all indicators
    pub fn all() -> Vec<IndicatorKind> {
        vec![
            IndicatorKind::Rsi,
            IndicatorKind::Bollinger,
            IndicatorKind::Ema,
            IndicatorKind::StochasticK,
            IndicatorKind::VolumeRatio,
        ]
    }
}
