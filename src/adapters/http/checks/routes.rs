//! HTTP routes for check endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_check, start_consistency_check, start_quality_check, CheckHandlers};

pub fn check_routes(handlers: CheckHandlers) -> Router {
    Router::new()
        .route("/projects/:id/quality-checks", post(start_quality_check))
        .route("/consistency-checks", post(start_consistency_check))
        .route("/checks/:id", get(get_check))
        .with_state(handlers)
}
