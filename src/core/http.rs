//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::Config;
use crate::error::AnalysisError;
use crate::ledger::{Ledger, LedgerEvent, LedgerProjection, RecordedEvent};
use crate::metrics::Metrics;
use crate::signals::engine::{normalize_ticker, AnalysisEngine, AnalysisReport, AnalysisRequest};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub engine: Arc<AnalysisEngine>,
}

impl AppState {
    pub fn new(engine: AnalysisEngine, metrics: Arc<Metrics>) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            engine: Arc::new(engine),
        }
    }

    fn ledger(&self) -> &Arc<Ledger> {
        self.engine.ledger()
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "pause-signal-service",
        "credential_configured": state.engine.has_credential(),
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Run one analysis. Hard failures map to the status codes on [`AnalysisError`].
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisReport>, AnalysisError> {
    let report = state.engine.analyze(request).await?;
    Ok(Json(report))
}

#[derive(Debug, Serialize)]
struct LedgerResponse {
    progress: LedgerProjection,
    events: Vec<RecordedEvent>,
}

async fn get_ledger(State(state): State<AppState>) -> Json<LedgerResponse> {
    let ledger = state.ledger();
    Json(LedgerResponse {
        progress: ledger.projection().await,
        events: ledger.events().await,
    })
}

#[derive(Debug, Deserialize)]
struct PauseRequest {
    ticker: String,
}

#[derive(Debug, Serialize)]
struct PauseResponse {
    event: RecordedEvent,
    progress: LedgerProjection,
}

async fn choose_pause(
    State(state): State<AppState>,
    Json(request): Json<PauseRequest>,
) -> Result<Json<PauseResponse>, AnalysisError> {
    let ticker = normalize_ticker(&request.ticker)?;
    let ledger = state.ledger();
    let event = ledger.append(LedgerEvent::PauseChosen { ticker }).await;
    Ok(Json(PauseResponse {
        event,
        progress: ledger.projection().await,
    }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/analyze", post(analyze))
        .route("/api/ledger", get(get_ledger))
        .route("/api/ledger/pause", post(choose_pause))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let engine = AnalysisEngine::from_config(&config, Arc::new(Ledger::new()))
        .with_metrics(metrics.clone());

    let app = create_router(AppState::new(engine, metrics));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
