//! Optional market context gathered around a ticker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marker rendered wherever an optional context value could not be fetched.
pub const UNAVAILABLE: &str = "unavailable";

/// Earnings within this many days raise a warning.
pub const EARNINGS_WARNING_DAYS: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSnapshot {
    /// SPY last close.
    pub index_price: f64,
    /// SPY change over the fetched window, in percent.
    pub index_change_pct_over_window: f64,
    /// VIX level.
    pub volatility_index: f64,
    /// 10Y treasury yield (^TNX), `None` when the feed omitted it.
    pub treasury_yield: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MacroContext {
    Available(MacroSnapshot),
    Unavailable,
}

impl MacroContext {
    pub fn snapshot(&self) -> Option<&MacroSnapshot> {
        match self {
            MacroContext::Available(snapshot) => Some(snapshot),
            MacroContext::Unavailable => None,
        }
    }

    pub fn volatility_index(&self) -> Option<f64> {
        self.snapshot().map(|s| s.volatility_index)
    }

    /// One-line summary used in prompts and reports.
    pub fn summary(&self) -> String {
        match self {
            MacroContext::Available(m) => format!(
                "VIX: {:.2}, SPY: ${:.2} ({:+.2}%), 10Y: {}",
                m.volatility_index,
                m.index_price,
                m.index_change_pct_over_window,
                m.treasury_yield
                    .map_or_else(|| UNAVAILABLE.to_string(), |y| format!("{:.2}%", y))
            ),
            MacroContext::Unavailable => format!("VIX: {}", UNAVAILABLE),
        }
    }
}

impl From<Option<MacroSnapshot>> for MacroContext {
    fn from(value: Option<MacroSnapshot>) -> Self {
        value.map_or(MacroContext::Unavailable, MacroContext::Available)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
}

/// Company name, fundamentals and ownership for the swing report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub profit_margins: Option<f64>,
    pub earnings_date: Option<NaiveDate>,
    #[serde(default)]
    pub institutional_holders: Vec<String>,
}

impl CompanyProfile {
    /// True when the next earnings report is 0 to 5 days after `today`.
    pub fn earnings_warning(&self, today: NaiveDate) -> bool {
        self.earnings_date
            .map(|date| (0..=EARNINGS_WARNING_DAYS).contains(&(date - today).num_days()))
            .unwrap_or(false)
    }

    pub fn market_cap_billions(&self) -> f64 {
        self.market_cap.map(|cap| cap / 1e9).unwrap_or(0.0)
    }

    pub fn holders_summary(&self) -> String {
        if self.institutional_holders.is_empty() {
            "None".to_string()
        } else {
            self.institutional_holders.join(", ")
        }
    }
}
