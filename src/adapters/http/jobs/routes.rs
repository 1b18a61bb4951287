//! HTTP routes for job endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_job, JobHandlers};

pub fn job_routes(handlers: JobHandlers) -> Router {
    Router::new()
        .route("/jobs/:id", get(get_job))
        .with_state(handlers)
}
