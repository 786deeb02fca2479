//! Decision payloads: the untrusted policy output and its sanitized form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::models::context::{CompanyProfile, MacroContext};
use crate::models::indicators::IndicatorSnapshot;
use crate::models::market::{Horizon, RiskProfile};

/// Final categorical recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Go,
    Wait,
    Stop,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Go => "GO",
            Verdict::Wait => "WAIT",
            Verdict::Stop => "STOP",
        }
    }

    /// Only GO means "enter"; WAIT and STOP are both "do not enter".
    pub fn is_entry(&self) -> bool {
        matches!(self, Verdict::Go)
    }

    /// Higher is more cautious.
    pub fn caution(&self) -> u8 {
        match self {
            Verdict::Go => 0,
            Verdict::Wait => 1,
            Verdict::Stop => 2,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untrusted recommendation payload. Nothing about its shape is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDecision(pub Value);

impl RawDecision {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parses policy text; unparseable text becomes an empty payload.
    pub fn from_text(text: &str) -> Self {
        Self(serde_json::from_str(text.trim()).unwrap_or(Value::Null))
    }

    /// Field lookup that tolerates non-object payloads.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(key))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for RawDecision {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub bullets: Vec<String>,
}

/// Sanitized decision. Every field is populated and in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub stop_loss: f64,
    pub target: f64,
    pub reasoning: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<ReportSection>,
}

/// Everything the recommendation policy sees for one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRequest {
    pub ticker: String,
    pub horizon: Horizon,
    pub price: f64,
    pub risk_profile: RiskProfile,
    pub indicators: IndicatorSnapshot,
    pub macro_context: MacroContext,
    pub headlines: Vec<String>,
    pub profile: Option<CompanyProfile>,
}
