//! Analysis pipeline: fetch, compute, ask the policy, sanitize, gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AnalysisError, PolicyError};
use crate::indicators::snapshot::compute_snapshot_report;
use crate::ledger::{Ledger, LedgerEvent};
use crate::metrics::Metrics;
use crate::models::context::{CompanyProfile, MacroContext, NewsItem};
use crate::models::decision::{Decision, DecisionRequest};
use crate::models::indicators::{IndicatorSnapshot, Trend};
use crate::models::market::{Horizon, Lookback, RiskProfile};
use crate::models::risk::RiskOverride;
use crate::services::fundamentals::{CompanyProfileProvider, YahooProfileProvider};
use crate::services::macro_context::MacroContextFetcher;
use crate::services::market_data::{CachedPriceProvider, PriceSeriesProvider, YahooChartProvider};
use crate::services::news::{GoogleNewsProvider, NewsProvider, MAX_HEADLINES};
use crate::services::policy::{OpenAiPolicy, RecommendationPolicy};
use crate::signals::decision::DecisionNormalizer;
use crate::signals::risk_gate::RiskGate;

pub const PRICE_LOOKBACK: Lookback = Lookback::SixMonths;
pub const MAX_TICKER_LEN: usize = 12;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub ticker: String,
    pub horizon: Horizon,
    #[serde(default)]
    pub risk_profile: RiskProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub horizon: Horizon,
    pub risk_profile: RiskProfile,
    pub price: f64,
    pub company_name: String,
    pub indicators: IndicatorSnapshot,
    pub trend: Trend,
    pub macro_context: MacroContext,
    pub macro_summary: String,
    pub news: Vec<NewsItem>,
    pub earnings_warning: bool,
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_override: Option<RiskOverride>,
    pub generated_at: DateTime<Utc>,
}

/// Trimmed, uppercased ticker. Letters, digits and `.-^=` only.
pub fn normalize_ticker(raw: &str) -> Result<String, AnalysisError> {
    let ticker = raw.trim().to_uppercase();
    let valid = !ticker.is_empty()
        && ticker.len() <= MAX_TICKER_LEN
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
    if valid {
        Ok(ticker)
    } else {
        Err(AnalysisError::InvalidTicker(raw.to_string()))
    }
}

pub struct AnalysisEngine {
    prices: Arc<dyn PriceSeriesProvider>,
    macro_fetcher: MacroContextFetcher,
    news: Arc<dyn NewsProvider>,
    profiles: Option<Arc<dyn CompanyProfileProvider>>,
    /// `None` until a credential is configured.
    policy: Option<Arc<dyn RecommendationPolicy>>,
    normalizer: DecisionNormalizer,
    risk_gate: RiskGate,
    ledger: Arc<Ledger>,
    metrics: Option<Arc<Metrics>>,
}

impl AnalysisEngine {
    /// Macro context is read through the same price provider.
    pub fn new(
        prices: Arc<dyn PriceSeriesProvider>,
        news: Arc<dyn NewsProvider>,
        policy: Option<Arc<dyn RecommendationPolicy>>,
        ledger: Arc<Ledger>,
    ) -> Self {
        Self {
            macro_fetcher: MacroContextFetcher::new(prices.clone()),
            prices,
            news,
            profiles: None,
            policy,
            normalizer: DecisionNormalizer::default(),
            risk_gate: RiskGate::default(),
            ledger,
            metrics: None,
        }
    }

    pub fn from_config(config: &Config, ledger: Arc<Ledger>) -> Self {
        let prices: Arc<dyn PriceSeriesProvider> = Arc::new(CachedPriceProvider::new(
            Arc::new(YahooChartProvider::new(config.yahoo_base_url.clone())),
            config.price_cache_ttl,
        ));
        let news = Arc::new(GoogleNewsProvider::new(config.news_base_url.clone()));
        let policy = config.openai_api_key.as_ref().and_then(|key| {
            OpenAiPolicy::new(
                config.openai_base_url.clone(),
                key.clone(),
                config.openai_model.clone(),
            )
            .ok()
            .map(|policy| Arc::new(policy) as Arc<dyn RecommendationPolicy>)
        });
        if policy.is_none() {
            warn!("OPENAI_API_KEY is not set; analyses will be refused until it is configured");
        }

        Self::new(prices, news, policy, ledger)
            .with_profiles(Arc::new(YahooProfileProvider::new(
                config.yahoo_base_url.clone(),
            )))
            .with_normalizer(DecisionNormalizer::new(config.normalizer))
            .with_risk_gate(config.risk_gate.clone())
    }

    pub fn with_profiles(mut self, profiles: Arc<dyn CompanyProfileProvider>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    pub fn with_macro_provider(mut self, provider: Arc<dyn PriceSeriesProvider>) -> Self {
        self.macro_fetcher = MacroContextFetcher::new(provider);
        self
    }

    pub fn with_normalizer(mut self, normalizer: DecisionNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_risk_gate(mut self, risk_gate: RiskGate) -> Self {
        self.risk_gate = risk_gate;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    pub fn has_credential(&self) -> bool {
        self.policy.is_some()
    }

    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let result = self.run(request).await;
        if let Err(e) = &result {
            warn!(error = %e, reason = e.reason(), "analysis failed");
            if let Some(metrics) = &self.metrics {
                metrics
                    .analysis_failures_total
                    .with_label_values(&[e.reason()])
                    .inc();
            }
        }
        result
    }

    async fn run(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let ticker = normalize_ticker(&request.ticker)?;
        let policy = self.policy.as_ref().ok_or(AnalysisError::MissingCredential)?;

        let series = self
            .prices
            .fetch_series(&ticker, PRICE_LOOKBACK)
            .await
            .map_err(|e| AnalysisError::DataUnavailable {
                ticker: ticker.clone(),
                reason: e.to_string(),
            })?;

        let computed = compute_snapshot_report(&series);
        if let Some(metrics) = &self.metrics {
            for kind in &computed.degraded {
                metrics
                    .indicator_fallbacks_total
                    .with_label_values(&[kind.name()])
                    .inc();
            }
        }
        let snapshot = computed.snapshot;

        let macro_context = MacroContext::from(self.macro_fetcher.fetch().await);
        let news = self.fetch_news(&ticker).await;
        let profile = self.fetch_profile(&ticker).await;

        let decision_request = DecisionRequest {
            ticker: ticker.clone(),
            horizon: request.horizon,
            price: snapshot.price,
            risk_profile: request.risk_profile,
            indicators: snapshot.clone(),
            macro_context: macro_context.clone(),
            headlines: news.iter().map(|item| item.title.clone()).collect(),
            profile: profile.clone(),
        };

        let raw = policy.decide(&decision_request).await.map_err(|e| match e {
            PolicyError::MissingCredential => AnalysisError::MissingCredential,
            other => AnalysisError::PolicyUnavailable(other.to_string()),
        })?;

        let decision = self.normalizer.normalize(&raw, &snapshot, request.horizon);
        let (decision, risk_override) =
            self.risk_gate
                .apply(decision, request.risk_profile, &snapshot, &macro_context);

        self.ledger
            .append(LedgerEvent::AnalysisPerformed {
                ticker: ticker.clone(),
                horizon: request.horizon,
                verdict: decision.verdict,
            })
            .await;
        if let Some(metrics) = &self.metrics {
            metrics
                .analyses_total
                .with_label_values(&[request.horizon.as_str(), decision.verdict.as_str()])
                .inc();
        }

        info!(
            ticker = %ticker,
            horizon = %request.horizon,
            verdict = %decision.verdict,
            degraded = computed.degraded.len(),
            overridden = risk_override.is_some(),
            "analysis complete"
        );

        let today = Utc::now().date_naive();
        Ok(AnalysisReport {
            company_name: profile
                .as_ref()
                .and_then(|p| p.name.clone())
                .unwrap_or_else(|| ticker.clone()),
            earnings_warning: profile.as_ref().is_some_and(|p| p.earnings_warning(today)),
            ticker,
            horizon: request.horizon,
            risk_profile: request.risk_profile,
            price: snapshot.price,
            trend: snapshot.trend(),
            indicators: snapshot,
            macro_summary: macro_context.summary(),
            macro_context,
            news,
            decision,
            risk_override,
            generated_at: Utc::now(),
        })
    }

    async fn fetch_news(&self, ticker: &str) -> Vec<NewsItem> {
        match self.news.fetch_headlines(ticker).await {
            Ok(mut items) => {
                items.truncate(MAX_HEADLINES);
                items
            }
            Err(e) => {
                warn!(ticker = ticker, error = %e, "news unavailable");
                Vec::new()
            }
        }
    }

    async fn fetch_profile(&self, ticker: &str) -> Option<CompanyProfile> {
        let provider = self.profiles.as_ref()?;
        match provider.fetch_profile(ticker).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(ticker = ticker, error = %e, "company profile unavailable");
                None
            }
        }
    }
}
