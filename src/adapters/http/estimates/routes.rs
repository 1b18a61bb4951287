//! HTTP routes for work-estimate endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{latest_work_estimate, run_work_estimate, EstimateHandlers};

pub fn estimate_routes(handlers: EstimateHandlers) -> Router {
    Router::new()
        .route("/projects/:id/work-estimates", post(run_work_estimate))
        .route("/projects/:id/work-estimates/latest", get(latest_work_estimate))
        .with_state(handlers)
}
