//! Environment-driven configuration.
//!
//! Values come from the process environment (optionally seeded from a
//! `.env` file by the binaries via `dotenvy`).

use std::env;
use std::time::Duration;

use crate::error::ConfigError;
use crate::signals::decision::{NormalizerConfig, VerdictMatching, VerdictScale};
use crate::signals::risk_gate::RiskGate;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_NEWS_BASE_URL: &str = "https://news.google.com";
pub const DEFAULT_PRICE_CACHE_TTL_SECS: u64 = 60;

/// Deployment environment name (`APP_ENV`), `sandbox` when unset.
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .map(|v| v.to_lowercase())
        .unwrap_or_else(|_| "sandbox".to_string())
}

/// `production` and `prod` select production behaviour.
pub fn is_production_environment(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    /// Required before any analysis can run; checked per request.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub yahoo_base_url: String,
    pub news_base_url: String,
    pub price_cache_ttl: Duration,
    pub normalizer: NormalizerConfig,
    pub risk_gate: RiskGate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: DEFAULT_PORT,
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            news_base_url: DEFAULT_NEWS_BASE_URL.to_string(),
            price_cache_ttl: Duration::from_secs(DEFAULT_PRICE_CACHE_TTL_SECS),
            normalizer: NormalizerConfig::default(),
            risk_gate: RiskGate::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: raw,
            })?,
            None => defaults.port,
        };

        let price_cache_ttl = match get("PRICE_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(raw.parse().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "PRICE_CACHE_TTL_SECS",
                    value: raw,
                }
            })?),
            None => defaults.price_cache_ttl,
        };

        let matching = match get("VERDICT_MATCHING").as_deref() {
            None | Some("substring") => VerdictMatching::Substring,
            Some("exact") => VerdictMatching::Exact,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "VERDICT_MATCHING",
                    value: other.to_string(),
                })
            }
        };

        let scale = match get("VERDICT_SCALE").as_deref() {
            None | Some("two_way") => VerdictScale::TwoWay,
            Some("three_way") => VerdictScale::ThreeWay,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "VERDICT_SCALE",
                    value: other.to_string(),
                })
            }
        };

        let risk_gate = match get("RISK_TABLE_PATH") {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path, source })?;
                RiskGate::from_json(&json)?
            }
            None => defaults.risk_gate,
        };

        Ok(Self {
            environment: get("APP_ENV")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.environment),
            port,
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            yahoo_base_url: get("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            news_base_url: get("NEWS_BASE_URL").unwrap_or(defaults.news_base_url),
            price_cache_ttl,
            normalizer: NormalizerConfig { matching, scale },
            risk_gate,
        })
    }

    pub fn is_production(&self) -> bool {
        is_production_environment(&self.environment)
    }
}
