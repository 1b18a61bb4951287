//! Top-level router: feature routes under `/api`, plus `/health`.

use std::time::Duration;

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::checks::{check_routes, CheckHandlers};
use super::code::{source_code_routes, SourceCodeHandlers};
use super::documents::{document_routes, DocumentHandlers};
use super::estimates::{estimate_routes, EstimateHandlers};
use super::jobs::{job_routes, JobHandlers};
use super::middleware::auth_middleware;
use super::projects::{project_routes, ProjectHandlers};
use super::proposals::{proposal_routes, ProposalHandlers};
use super::reports::{report_routes, ReportHandlers};
use super::state::AppState;

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the application router.
pub fn build_router(state: AppState, config: &RouterConfig) -> Router {
    let api = Router::new()
        .merge(project_routes(ProjectHandlers::new(&state)))
        .merge(document_routes(DocumentHandlers::new(&state)))
        .merge(source_code_routes(SourceCodeHandlers::new(&state)))
        .merge(check_routes(CheckHandlers::new(&state)))
        .merge(estimate_routes(EstimateHandlers::new(&state)))
        .merge(report_routes(ReportHandlers::new(&state)))
        .merge(proposal_routes(ProposalHandlers::new(&state)))
        .merge(job_routes(JobHandlers::new(&state)))
        .layer(middleware::from_fn_with_state(
            state.validator.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed)
    }
}
