//! Company profile: name, fundamentals, earnings date, top holders.

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;
use url::Url;

use crate::error::FetchError;
use crate::models::context::CompanyProfile;

pub const MAX_HOLDERS: usize = 3;

const MODULES: &str =
    "price,summaryDetail,defaultKeyStatistics,financialData,calendarEvents,institutionOwnership";

#[async_trait]
pub trait CompanyProfileProvider: Send + Sync {
    async fn fetch_profile(&self, ticker: &str) -> Result<CompanyProfile, FetchError>;
}

/// Yahoo Finance quoteSummary endpoint.
pub struct YahooProfileProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooProfileProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn summary_url(&self, ticker: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["v10", "finance", "quoteSummary", ticker]);
        url.query_pairs_mut().append_pair("modules", MODULES);
        Ok(url)
    }
}

#[async_trait]
impl CompanyProfileProvider for YahooProfileProvider {
    async fn fetch_profile(&self, ticker: &str) -> Result<CompanyProfile, FetchError> {
        let url = self.summary_url(ticker)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                source_name: "yahoo quoteSummary",
                status: status.as_u16(),
            });
        }
        let body: Value = response.json().await.map_err(|e| FetchError::Decode {
            source_name: "yahoo quoteSummary",
            message: e.to_string(),
        })?;

        let result = body
            .pointer("/quoteSummary/result/0")
            .ok_or_else(|| FetchError::Empty(ticker.to_string()))?;
        Ok(profile_from_summary(result))
    }
}

/// Yahoo wraps numbers as `{"raw": 1.0, "fmt": "1.00"}`; plain numbers are
/// accepted too.
fn raw_number(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    value
        .get("raw")
        .unwrap_or(value)
        .as_f64()
        .filter(|v| v.is_finite())
}

pub fn profile_from_summary(result: &Value) -> CompanyProfile {
    let name = result
        .pointer("/price/longName")
        .and_then(Value::as_str)
        .or_else(|| result.pointer("/price/shortName").and_then(Value::as_str))
        .map(str::to_string);

    let earnings_date = raw_number(result.pointer("/calendarEvents/earnings/earningsDate/0"))
        .and_then(|ts| DateTime::from_timestamp(ts as i64, 0))
        .map(|dt| dt.date_naive());

    let institutional_holders = result
        .pointer("/institutionOwnership/ownershipList")
        .and_then(Value::as_array)
        .map(|holders| {
            holders
                .iter()
                .filter_map(|h| h.get("organization").and_then(Value::as_str))
                .take(MAX_HOLDERS)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    CompanyProfile {
        name,
        market_cap: raw_number(result.pointer("/price/marketCap"))
            .or_else(|| raw_number(result.pointer("/summaryDetail/marketCap"))),
        trailing_pe: raw_number(result.pointer("/summaryDetail/trailingPE")),
        revenue_growth: raw_number(result.pointer("/financialData/revenueGrowth")),
        profit_margins: raw_number(result.pointer("/financialData/profitMargins"))
            .or_else(|| raw_number(result.pointer("/defaultKeyStatistics/profitMargins"))),
        earnings_date,
        institutional_holders,
    }
}
