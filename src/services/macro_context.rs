//! Macro backdrop: S&P 500 ETF, volatility index and 10Y yield.

use std::sync::Arc;
use tracing::warn;

use crate::error::FetchError;
use crate::models::context::MacroSnapshot;
use crate::models::market::{Lookback, PriceSeries};
use crate::services::market_data::PriceSeriesProvider;

pub const INDEX_TICKER: &str = "SPY";
pub const VOLATILITY_TICKER: &str = "^VIX";
pub const TREASURY_TICKER: &str = "^TNX";

/// Thin wrapper over a price provider for the index/volatility tickers.
pub struct MacroContextFetcher {
    provider: Arc<dyn PriceSeriesProvider>,
    lookback: Lookback,
}

impl MacroContextFetcher {
    pub fn new(provider: Arc<dyn PriceSeriesProvider>) -> Self {
        Self {
            provider,
            lookback: Lookback::FiveDays,
        }
    }

    /// `None` when the index or volatility series cannot be fetched. A
    /// missing yield alone is left out of the snapshot.
    pub async fn fetch(&self) -> Option<MacroSnapshot> {
        match self.try_fetch().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "macro context unavailable");
                None
            }
        }
    }

    async fn try_fetch(&self) -> Result<MacroSnapshot, FetchError> {
        let index = self
            .provider
            .fetch_series(INDEX_TICKER, self.lookback)
            .await?;
        let volatility = self
            .provider
            .fetch_series(VOLATILITY_TICKER, self.lookback)
            .await?;
        let treasury_yield = match self
            .provider
            .fetch_series(TREASURY_TICKER, self.lookback)
            .await
        {
            Ok(series) => Some(series.latest().close),
            Err(e) => {
                warn!(error = %e, "treasury yield unavailable");
                None
            }
        };

        Ok(MacroSnapshot {
            index_price: index.latest().close,
            index_change_pct_over_window: change_pct(&index),
            volatility_index: volatility.latest().close,
            treasury_yield,
        })
    }
}

/// Percent change from the first to the last close of the series.
pub fn change_pct(series: &PriceSeries) -> f64 {
    let first = series.first().close;
    let last = series.latest().close;
    if first == 0.0 {
        return 0.0;
    }
    (last - first) / first * 100.0
}
