//! Risk-profile decision table applied after normalization.

use tracing::info;

use crate::models::context::MacroContext;
use crate::models::decision::{Decision, Verdict};
use crate::models::indicators::IndicatorSnapshot;
use crate::models::market::RiskProfile;
use crate::models::risk::{Comparison, GateIndicator, RiskOverride, RiskRule};

/// Deterministic safety clamp on top of the policy verdict.
///
/// Rules only ever make a verdict more cautious.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskGate {
    rules: Vec<RiskRule>,
}

impl RiskGate {
    pub fn new(rules: Vec<RiskRule>) -> Self {
        Self { rules }
    }

    /// Load a table from a JSON array of rules.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn rules(&self) -> &[RiskRule] {
        &self.rules
    }

    pub fn apply(
        &self,
        mut decision: Decision,
        profile: RiskProfile,
        snapshot: &IndicatorSnapshot,
        macro_context: &MacroContext,
    ) -> (Decision, Option<RiskOverride>) {
        let strongest = self
            .rules
            .iter()
            .filter(|rule| rule.profile == profile)
            .filter(|rule| rule.verdict.caution() > decision.verdict.caution())
            .filter_map(|rule| {
                let observed = rule.indicator.read(snapshot, macro_context)?;
                rule.comparison
                    .holds(observed, rule.threshold)
                    .then_some((rule, observed))
            })
            .max_by_key(|(rule, _)| rule.verdict.caution());

        let Some((rule, observed)) = strongest else {
            return (decision, None);
        };

        let risk_override = RiskOverride {
            rule: rule.describe(),
            observed,
            original: decision.verdict,
            forced: rule.verdict,
        };
        info!(
            rule = %risk_override.rule,
            observed = observed,
            original = %risk_override.original,
            forced = %risk_override.forced,
            "risk gate overrode verdict"
        );
        decision.verdict = rule.verdict;
        (decision, Some(risk_override))
    }
}

impl Default for RiskGate {
    fn default() -> Self {
        use Comparison::Above;
        use GateIndicator::{RSI, VIX};
        use RiskProfile::{Aggressive, Conservative, Moderate};

        Self::new(vec![
            RiskRule::new(Conservative, RSI, Above, 60.0, Verdict::Wait),
            RiskRule::new(Conservative, VIX, Above, 30.0, Verdict::Wait),
            RiskRule::new(Moderate, RSI, Above, 70.0, Verdict::Wait),
            RiskRule::new(Aggressive, RSI, Above, 75.0, Verdict::Wait),
        ])
    }
}
