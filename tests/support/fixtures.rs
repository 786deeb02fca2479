//! Shared builders and in-memory collaborators for the test suites

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pause::error::{FetchError, PolicyError};
use pause::ledger::Ledger;
use pause::models::context::{CompanyProfile, NewsItem};
use pause::models::decision::{DecisionRequest, RawDecision};
use pause::models::market::{Lookback, PriceBar, PriceSeries};
use pause::services::fundamentals::CompanyProfileProvider;
use pause::services::news::NewsProvider;
use pause::services::policy::RecommendationPolicy;
use pause::services::market_data::PriceSeriesProvider;
use pause::signals::engine::AnalysisEngine;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const DAY: i64 = 86_400;
const START: i64 = 1_700_000_000;

pub fn day(index: usize) -> DateTime<Utc> {
    DateTime::from_timestamp(START + index as i64 * DAY, 0).expect("valid timestamp")
}

/// Flat bars (open = high = low = close) with a constant volume.
pub fn bars_from_closes(closes: &[f64], volume: f64) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar::new(close, close, close, close, volume, day(i)))
        .collect()
}

pub fn bars_with_volumes(closes: &[f64], volumes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| PriceBar::new(close, close, close, close, volume, day(i)))
        .collect()
}

pub fn series(ticker: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries::new(ticker, bars_from_closes(closes, 1000.0)).expect("non-empty series")
}

/// `count` closes rising by 1 from `start`.
pub fn rising(start: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + i as f64).collect()
}

/// Fifteen closes alternating +2 / -1, which puts RSI(14) at 66.67.
pub fn choppy_uptrend() -> Vec<f64> {
    let mut closes = vec![100.0];
    for i in 0..14 {
        let last = closes[closes.len() - 1];
        closes.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
    }
    closes
}

/// Price provider backed by a fixed map of series. Unknown tickers fail.
#[derive(Default)]
pub struct StaticPriceProvider {
    series: HashMap<String, PriceSeries>,
    calls: AtomicUsize,
}

impl StaticPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ticker: &str, closes: &[f64]) -> Self {
        self.series.insert(ticker.to_string(), series(ticker, closes));
        self
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.series.insert(series.ticker().to_string(), series);
        self
    }

    /// SPY, ^VIX and ^TNX over five sessions.
    pub fn with_macro(self, vix: f64) -> Self {
        self.with("SPY", &[500.0, 502.0, 498.0, 505.0, 510.0])
            .with("^VIX", &[vix, vix, vix, vix, vix])
            .with("^TNX", &[4.2, 4.25, 4.3, 4.28, 4.31])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSeriesProvider for StaticPriceProvider {
    async fn fetch_series(
        &self,
        ticker: &str,
        _lookback: Lookback,
    ) -> Result<PriceSeries, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.series
            .get(ticker)
            .cloned()
            .ok_or_else(|| FetchError::Empty(ticker.to_string()))
    }
}

pub struct StaticNews {
    items: Option<Vec<NewsItem>>,
}

impl StaticNews {
    pub fn titles(titles: &[&str]) -> Self {
        Self {
            items: Some(
                titles
                    .iter()
                    .map(|t| NewsItem {
                        title: t.to_string(),
                        url: format!("https://news.example/{}", t.len()),
                    })
                    .collect(),
            ),
        }
    }

    pub fn failing() -> Self {
        Self { items: None }
    }
}

#[async_trait]
impl NewsProvider for StaticNews {
    async fn fetch_headlines(&self, _ticker: &str) -> Result<Vec<NewsItem>, FetchError> {
        self.items.clone().ok_or(FetchError::Status {
            source_name: "static news",
            status: 503,
        })
    }
}

pub struct StaticProfiles(pub Option<CompanyProfile>);

#[async_trait]
impl CompanyProfileProvider for StaticProfiles {
    async fn fetch_profile(&self, ticker: &str) -> Result<CompanyProfile, FetchError> {
        self.0
            .clone()
            .ok_or_else(|| FetchError::Empty(ticker.to_string()))
    }
}

/// Policy that answers every request with the same payload and records what
/// it was asked.
pub struct ScriptedPolicy {
    payload: Value,
    requests: Mutex<Vec<DecisionRequest>>,
}

impl ScriptedPolicy {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<DecisionRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl RecommendationPolicy for ScriptedPolicy {
    async fn decide(&self, request: &DecisionRequest) -> Result<RawDecision, PolicyError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        Ok(RawDecision::new(self.payload.clone()))
    }
}

pub struct FailingPolicy;

#[async_trait]
impl RecommendationPolicy for FailingPolicy {
    async fn decide(&self, _request: &DecisionRequest) -> Result<RawDecision, PolicyError> {
        Err(PolicyError::Status(500))
    }
}

pub fn engine(
    prices: Arc<StaticPriceProvider>,
    policy: Option<Arc<dyn RecommendationPolicy>>,
) -> AnalysisEngine {
    AnalysisEngine::new(
        prices,
        Arc::new(StaticNews::titles(&["Earnings beat", "New product launch"])),
        policy,
        Arc::new(Ledger::new()),
    )
}
