//! Risk decision-table data models

use serde::{Deserialize, Serialize};

use crate::models::context::MacroContext;
use crate::models::decision::Verdict;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::market::RiskProfile;

/// Indicator a risk rule reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum GateIndicator {
    RSI,
    StochK,
    VolumeRatio,
    /// Macro-dependent; rules on it are skipped when macro data is missing.
    VIX,
}

impl GateIndicator {
    pub fn read(&self, snapshot: &IndicatorSnapshot, macro_context: &MacroContext) -> Option<f64> {
        match self {
            GateIndicator::RSI => Some(snapshot.rsi14),
            GateIndicator::StochK => Some(snapshot.stoch_k14),
            GateIndicator::VolumeRatio => Some(snapshot.volume_ratio_pct),
            GateIndicator::VIX => macro_context.volatility_index(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GateIndicator::RSI => "RSI",
            GateIndicator::StochK => "Stoch %K",
            GateIndicator::VolumeRatio => "Volume ratio",
            GateIndicator::VIX => "VIX",
        }
    }
}

/// Comparison operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Comparison {
    Above,
    Below,
}

impl Comparison {
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Above => value > threshold,
            Comparison::Below => value < threshold,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Comparison::Above => ">",
            Comparison::Below => "<",
        }
    }
}

/// One row of the risk decision table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRule {
    pub profile: RiskProfile,
    pub indicator: GateIndicator,
    pub comparison: Comparison,
    pub threshold: f64,
    /// Verdict forced when the rule fires.
    pub verdict: Verdict,
}

impl RiskRule {
    pub fn new(
        profile: RiskProfile,
        indicator: GateIndicator,
        comparison: Comparison,
        threshold: f64,
        verdict: Verdict,
    ) -> Self {
        Self {
            profile,
            indicator,
            comparison,
            threshold,
            verdict,
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} profile: {} {} {}",
            self.profile,
            self.indicator.label(),
            self.comparison.symbol(),
            self.threshold
        )
    }
}

/// Record of a risk rule overriding the policy verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskOverride {
    pub rule: String,
    pub observed: f64,
    pub original: Verdict,
    pub forced: Verdict,
}
