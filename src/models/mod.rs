//! Shared data models spanning the engine layers.

pub mod context;
pub mod decision;
pub mod indicators;
pub mod market;
pub mod risk;

pub use context::{CompanyProfile, MacroContext, MacroSnapshot, NewsItem};
pub use decision::{Decision, DecisionRequest, RawDecision, ReportSection, Verdict};
pub use indicators::{BollingerBands, IndicatorSnapshot, Trend};
pub use market::{Horizon, Lookback, PriceBar, PriceSeries, RiskProfile};
pub use risk::{Comparison, GateIndicator, RiskOverride, RiskRule};
