//! Decision pipeline: payload coercion, normalization, risk gate and the
//! analysis engine that drives them.

pub mod coercion;
pub mod decision;
pub mod engine;
pub mod risk_gate;

pub use decision::{DecisionNormalizer, NormalizerConfig, VerdictMatching, VerdictScale};
pub use engine::{AnalysisEngine, AnalysisReport, AnalysisRequest};
pub use risk_gate::RiskGate;
