//! Decision normalization: untrusted policy payload in, renderable decision out.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::models::decision::{Decision, RawDecision, ReportSection, Verdict};
use crate::models::indicators::IndicatorSnapshot;
use crate::models::market::Horizon;
use crate::signals::coercion::{self, CoercionError};

pub const REASONING_FALLBACK: &str = "No explanation provided.";
pub const SECTION_FALLBACK: &str = "No data.";

/// Momentum trades default to a 2% band around the current price.
pub const MOMENTUM_STOP_MULTIPLIER: f64 = 0.98;
pub const MOMENTUM_TARGET_MULTIPLIER: f64 = 1.02;

/// Used when the horizon's own fallback is not a usable price.
const SECONDARY_STOP_MULTIPLIER: f64 = 0.95;
const SECONDARY_TARGET_MULTIPLIER: f64 = 1.05;
const PRICE_FLOOR: f64 = 0.01;

/// How the verdict string is matched against the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictMatching {
    /// Case-sensitive whole-string match.
    Exact,
    /// Case-insensitive search, most cautious word wins.
    #[default]
    Substring,
}

/// Whether STOP survives normalization or collapses into WAIT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictScale {
    #[default]
    TwoWay,
    ThreeWay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizerConfig {
    pub matching: VerdictMatching,
    pub scale: VerdictScale,
}

/// Stop-loss and target used when the payload has no usable value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackLevels {
    pub stop_loss: f64,
    pub target: f64,
}

impl FallbackLevels {
    pub fn for_horizon(snapshot: &IndicatorSnapshot, horizon: Horizon) -> Self {
        let price = snapshot.price;
        let (stop, target) = match horizon {
            Horizon::Momentum => (
                price * MOMENTUM_STOP_MULTIPLIER,
                price * MOMENTUM_TARGET_MULTIPLIER,
            ),
            Horizon::Swing => (snapshot.bb_lower, snapshot.bb_upper),
        };

        Self {
            stop_loss: first_positive(&[stop, price * SECONDARY_STOP_MULTIPLIER]),
            target: first_positive(&[target, price * SECONDARY_TARGET_MULTIPLIER]),
        }
    }
}

fn first_positive(candidates: &[f64]) -> f64 {
    candidates
        .iter()
        .copied()
        .find(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(PRICE_FLOOR)
}

/// Payload keys per horizon, first match wins.
struct FieldKeys {
    target: &'static [&'static str],
    reasoning: &'static [&'static str],
}

const MOMENTUM_KEYS: FieldKeys = FieldKeys {
    target: &["target_tomorrow", "target"],
    reasoning: &["reasoning_list", "reasoning"],
};

const SWING_KEYS: FieldKeys = FieldKeys {
    target: &["target", "target_price"],
    reasoning: &["conclusion", "reasoning"],
};

const SWING_SECTIONS: [(&str, &str); 3] = [
    ("fund_analysis", "Fundamentals"),
    ("tech_analysis", "Technicals"),
    ("conclusion", "Conclusion"),
];

fn keys_for(horizon: Horizon) -> &'static FieldKeys {
    match horizon {
        Horizon::Momentum => &MOMENTUM_KEYS,
        Horizon::Swing => &SWING_KEYS,
    }
}

fn lookup<'a>(raw: &'a RawDecision, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| raw.field(key))
        .find(|value| !value.is_null())
}

/// Turns any policy payload into a fully populated [`Decision`].
///
/// Never fails and holds no state, so identical inputs give identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionNormalizer {
    config: NormalizerConfig,
}

impl DecisionNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn normalize(
        &self,
        raw: &RawDecision,
        snapshot: &IndicatorSnapshot,
        horizon: Horizon,
    ) -> Decision {
        let keys = keys_for(horizon);
        let fallback = FallbackLevels::for_horizon(snapshot, horizon);

        let verdict = self.coerce_verdict(raw.field("verdict"));
        let stop_loss = level_or(raw.field("stop_loss"), fallback.stop_loss, "stop_loss");
        let target = level_or(lookup(raw, keys.target), fallback.target, "target");
        let reasoning = bullets_or(lookup(raw, keys.reasoning), REASONING_FALLBACK, "reasoning");

        let sections = match horizon {
            Horizon::Momentum => Vec::new(),
            Horizon::Swing => SWING_SECTIONS
                .iter()
                .map(|(key, title)| ReportSection {
                    title: title.to_string(),
                    bullets: bullets_or(raw.field(key), SECTION_FALLBACK, key),
                })
                .collect(),
        };

        Decision {
            verdict,
            stop_loss,
            target,
            reasoning,
            sections,
        }
    }

    /// Map the raw verdict onto the vocabulary; anything unrecognized is WAIT.
    pub fn coerce_verdict(&self, value: Option<&Value>) -> Verdict {
        let verdict = match coercion::verdict_text(value) {
            Ok(text) => self.match_text(text).unwrap_or_else(|| {
                debug!(verdict = %text, "verdict outside vocabulary, defaulting to WAIT");
                Verdict::Wait
            }),
            Err(e) => {
                debug!(error = %e, "unusable verdict field, defaulting to WAIT");
                Verdict::Wait
            }
        };

        match (verdict, self.config.scale) {
            (Verdict::Stop, VerdictScale::TwoWay) => Verdict::Wait,
            (verdict, _) => verdict,
        }
    }

    fn match_text(&self, text: &str) -> Option<Verdict> {
        match self.config.matching {
            VerdictMatching::Exact => match text {
                "GO" => Some(Verdict::Go),
                "WAIT" => Some(Verdict::Wait),
                "STOP" => Some(Verdict::Stop),
                _ => None,
            },
            VerdictMatching::Substring => {
                let upper = text.to_uppercase();
                [Verdict::Stop, Verdict::Wait, Verdict::Go]
                    .into_iter()
                    .find(|verdict| upper.contains(verdict.as_str()))
            }
        }
    }
}

fn level_or(value: Option<&Value>, fallback: f64, field: &str) -> f64 {
    coercion::price_level(value).unwrap_or_else(|e| {
        log_fallback(field, &e);
        fallback
    })
}

fn bullets_or(value: Option<&Value>, fallback: &str, field: &str) -> Vec<String> {
    coercion::bullets(value).unwrap_or_else(|e| {
        log_fallback(field, &e);
        vec![fallback.to_string()]
    })
}

fn log_fallback(field: &str, error: &CoercionError) {
    debug!(field = field, error = %error, "policy field unusable, applying fallback");
}
