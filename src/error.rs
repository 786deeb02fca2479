use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure at a data-source boundary (prices, news, fundamentals).
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {source_name}")]
    Status { source_name: &'static str, status: u16 },

    #[error("could not decode {source_name} response: {message}")]
    Decode {
        source_name: &'static str,
        message: String,
    },

    #[error("no data returned for {0}")]
    Empty(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Failure calling the recommendation policy itself. Malformed content is
/// not an error here; it is absorbed by the decision normalizer.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("recommendation policy credential is not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("policy endpoint returned status {0}")]
    Status(u16),

    #[error("policy returned no message content")]
    EmptyResponse,
}

/// Hard failures of one analysis. Everything else degrades to defaults.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("invalid ticker: {0:?}")]
    InvalidTicker(String),

    #[error("OPENAI_API_KEY is not configured; set it in the environment or .env file")]
    MissingCredential,

    #[error("price data unavailable for {ticker}: {reason}")]
    DataUnavailable { ticker: String, reason: String },

    #[error("recommendation policy unavailable: {0}")]
    PolicyUnavailable(String),
}

impl AnalysisError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AnalysisError::InvalidTicker(_) => "invalid_ticker",
            AnalysisError::MissingCredential => "missing_credential",
            AnalysisError::DataUnavailable { .. } => "data_unavailable",
            AnalysisError::PolicyUnavailable(_) => "policy_unavailable",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::InvalidTicker(_) => StatusCode::BAD_REQUEST,
            AnalysisError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
            AnalysisError::DataUnavailable { .. } => StatusCode::NOT_FOUND,
            AnalysisError::PolicyUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "reason": self.reason(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid risk table: {0}")]
    RiskTable(#[from] serde_json::Error),
}
