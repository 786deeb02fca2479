//! Recommendation policy: the LLM call, treated as an opaque function.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::PolicyError;
use crate::models::decision::{DecisionRequest, RawDecision};
use crate::models::market::Horizon;

const NEWS_PROMPT_CHARS: usize = 500;

const MOMENTUM_SYSTEM: &str = "You are a High-Frequency Trader. Predict if the stock will be GREEN TOMORROW. \
Output JSON: {verdict, entry_price, target_tomorrow, stop_loss, reasoning_list}. \
IMPORTANT: 'verdict' MUST be 'GO' or 'WAIT' (Do not use 'GREEN').";

const SWING_SYSTEM: &str = "You are a Swing Trader. Identify high-probability setups. \
Output JSON: {verdict, stop_loss, target, fund_analysis, tech_analysis, conclusion}. \
IMPORTANT: 'verdict' MUST be 'GO' or 'WAIT'.";

#[async_trait]
pub trait RecommendationPolicy: Send + Sync {
    /// Returns whatever the policy produced; the caller validates every field.
    async fn decide(&self, request: &DecisionRequest) -> Result<RawDecision, PolicyError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Fixed prompt text per horizon.
pub fn build_prompt(request: &DecisionRequest) -> Prompt {
    match request.horizon {
        Horizon::Momentum => momentum_prompt(request),
        Horizon::Swing => swing_prompt(request),
    }
}

fn momentum_prompt(request: &DecisionRequest) -> Prompt {
    let ind = &request.indicators;
    let news = if request.headlines.is_empty() {
        "No news.".to_string()
    } else {
        request
            .headlines
            .iter()
            .map(|title| format!("- {}", title))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let news: String = news.chars().take(NEWS_PROMPT_CHARS).collect();

    let user = format!(
        "Analyze {}. Price ${:.2}, EMA5 ${:.2} ({}), Stoch {:.1}, Vol {:.0}%, Candle {}, {}. News: {}",
        request.ticker,
        request.price,
        ind.ema5,
        ind.trend().as_str(),
        ind.stoch_k14,
        ind.volume_ratio_pct,
        if ind.is_up_candle { "GREEN" } else { "RED" },
        request.macro_context.summary(),
        news
    );

    Prompt {
        system: MOMENTUM_SYSTEM.to_string(),
        user,
    }
}

fn swing_prompt(request: &DecisionRequest) -> Prompt {
    let ind = &request.indicators;
    let profile = request.profile.clone().unwrap_or_default();

    let user = format!(
        "Analyze {}. Risk {}. Cap ${:.1}B, P/E {}, Whales: {}. RSI {:.1}, Vol {:.0}%, \
Bollinger ${:.2}-${:.2}. Market {}. Decide GO/WAIT.",
        request.ticker,
        request.risk_profile,
        profile.market_cap_billions(),
        profile
            .trailing_pe
            .map(|pe| format!("{:.1}", pe))
            .unwrap_or_else(|| "0".to_string()),
        profile.holders_summary(),
        ind.rsi14,
        ind.volume_ratio_pct,
        ind.bb_lower,
        ind.bb_upper,
        request.macro_context.summary(),
    );

    Prompt {
        system: SWING_SYSTEM.to_string(),
        user,
    }
}

/// OpenAI chat-completions client in JSON mode.
pub struct OpenAiPolicy {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiPolicy {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, PolicyError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PolicyError::MissingCredential);
        }
        Ok(Self {
            base_url: base_url.into(),
            api_key,
            model: model.into(),
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RecommendationPolicy for OpenAiPolicy {
    async fn decide(&self, request: &DecisionRequest) -> Result<RawDecision, PolicyError> {
        let prompt = build_prompt(request);
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user},
            ],
            "response_format": {"type": "json_object"},
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PolicyError::Status(status.as_u16()));
        }

        // An envelope we cannot read is a transport problem; the message
        // content itself is handed on untouched.
        let completion: ChatCompletion = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(PolicyError::EmptyResponse)?;

        debug!(ticker = %request.ticker, chars = content.len(), "policy responded");
        Ok(RawDecision::from_text(&content))
    }
}
