//! Test utilities for API server integration tests

use crate::fixtures::{rising, ScriptedPolicy, StaticNews, StaticPriceProvider};
use axum_test::TestServer;
use pause::core::http::{create_router, AppState};
use pause::ledger::Ledger;
use pause::metrics::Metrics;
use pause::services::policy::RecommendationPolicy;
use pause::signals::engine::AnalysisEngine;
use serde_json::json;
use std::sync::Arc;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        let policy: Arc<dyn RecommendationPolicy> = Arc::new(ScriptedPolicy::new(json!({
            "verdict": "GO",
            "stop_loss": 30.0,
            "target": 48.0,
            "reasoning_list": ["Momentum building", "Volume steady"]
        })));
        Self::with_policy(Some(policy))
    }

    /// Server whose engine has no policy credential configured.
    pub async fn without_credential() -> Self {
        Self::with_policy(None)
    }

    fn with_policy(policy: Option<Arc<dyn RecommendationPolicy>>) -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let prices = Arc::new(
            StaticPriceProvider::new()
                .with("NVDA", &rising(10.0, 30))
                .with_macro(18.0),
        );
        let engine = AnalysisEngine::new(
            prices,
            Arc::new(StaticNews::titles(&["Chip demand surges"])),
            policy,
            Arc::new(Ledger::new()),
        )
        .with_metrics(metrics.clone());

        let app = create_router(AppState::new(engine, metrics.clone()));
        let server = TestServer::new(app).expect("start test server");

        Self { server, metrics }
    }
}
