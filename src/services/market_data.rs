//! Price history providers.

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::models::market::{Lookback, PriceBar, PriceSeries};

#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// Daily bars for `ticker` over `lookback`. An empty history is an error.
    async fn fetch_series(&self, ticker: &str, lookback: Lookback)
        -> Result<PriceSeries, FetchError>;
}

/// Yahoo Finance v8 chart endpoint.
pub struct YahooChartProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooChartProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn chart_url(&self, ticker: &str, lookback: Lookback) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        url.query_pairs_mut()
            .append_pair("range", lookback.as_range())
            .append_pair("interval", "1d");
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Zip the column arrays into bars, dropping sessions without a usable close.
fn bars_from_chart(result: &ChartResult) -> Vec<PriceBar> {
    let Some(quote) = result.indicators.quote.first() else {
        return Vec::new();
    };
    let column = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let close = column(&quote.close, i).filter(|c| c.is_finite() && *c > 0.0)?;
            let timestamp = DateTime::from_timestamp(ts, 0)?;
            Some(PriceBar::new(
                column(&quote.open, i).unwrap_or(close),
                column(&quote.high, i).unwrap_or(close),
                column(&quote.low, i).unwrap_or(close),
                close,
                column(&quote.volume, i).unwrap_or(0.0),
                timestamp,
            ))
        })
        .collect()
}

#[async_trait]
impl PriceSeriesProvider for YahooChartProvider {
    async fn fetch_series(
        &self,
        ticker: &str,
        lookback: Lookback,
    ) -> Result<PriceSeries, FetchError> {
        let url = self.chart_url(ticker, lookback)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                source_name: "yahoo chart",
                status: status.as_u16(),
            });
        }

        let envelope: ChartEnvelope =
            response.json().await.map_err(|e| FetchError::Decode {
                source_name: "yahoo chart",
                message: e.to_string(),
            })?;

        let bars = envelope
            .chart
            .result
            .as_deref()
            .and_then(|results| results.first())
            .map(bars_from_chart)
            .unwrap_or_default();

        debug!(ticker = ticker, bars = bars.len(), range = lookback.as_range(), "fetched chart");
        PriceSeries::new(ticker, bars).ok_or_else(|| FetchError::Empty(ticker.to_string()))
    }
}

struct CachedSeries {
    series: PriceSeries,
    fetched_at: Instant,
}

/// Short-lived cache in front of another provider. Failures are not cached.
pub struct CachedPriceProvider {
    inner: Arc<dyn PriceSeriesProvider>,
    ttl: Duration,
    entries: RwLock<HashMap<(String, Lookback), CachedSeries>>,
}

impl CachedPriceProvider {
    pub fn new(inner: Arc<dyn PriceSeriesProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl PriceSeriesProvider for CachedPriceProvider {
    async fn fetch_series(
        &self,
        ticker: &str,
        lookback: Lookback,
    ) -> Result<PriceSeries, FetchError> {
        let key = (ticker.to_string(), lookback);
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key) {
                if entry.fetched_at.elapsed() < self.ttl {
                    debug!(ticker = ticker, "price cache hit");
                    return Ok(entry.series.clone());
                }
            }
        }

        let series = self.inner.fetch_series(ticker, lookback).await?;
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CachedSeries {
                series: series.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(series)
    }
}
