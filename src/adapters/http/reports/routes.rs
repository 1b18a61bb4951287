//! HTTP routes for progress-report endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_progress_report, run_progress_report, ReportHandlers};

pub fn report_routes(handlers: ReportHandlers) -> Router {
    Router::new()
        .route("/projects/:id/progress-reports", post(run_progress_report))
        .route("/progress-reports/:id", get(get_progress_report))
        .with_state(handlers)
}
