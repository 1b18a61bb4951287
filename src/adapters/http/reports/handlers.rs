//! HTTP handlers for progress-report endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::report::{
    GetProgressReportHandler, RunProgressReportCommand, RunProgressReportHandler,
};

use super::dto::{ProgressReportRequest, ProgressReportResponse, StoredReportResponse};

#[derive(Clone)]
pub struct ReportHandlers {
    run_handler: Arc<RunProgressReportHandler>,
    get_handler: Arc<GetProgressReportHandler>,
}

impl ReportHandlers {
    pub fn new(state: &AppState) -> Self {
        let repos = &state.repos;
        Self {
            run_handler: Arc::new(RunProgressReportHandler::new(
                repos.projects.clone(),
                repos.reports.clone(),
                state.generator.clone(),
                state.public_base_url.clone(),
            )),
            get_handler: Arc::new(GetProgressReportHandler::new(repos.reports.clone())),
        }
    }
}

/// POST /api/projects/:id/progress-reports
pub async fn run_progress_report(
    State(handlers): State<ReportHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(project_id): Path<String>,
    Json(req): Json<ProgressReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (start, end) = req.period()?;
    let cmd = RunProgressReportCommand {
        project_id: parse_id(&project_id, "project")?,
        start,
        end,
    };
    let outcome = handlers.run_handler.handle(cmd).await?;
    Ok(Json(ProgressReportResponse::from(outcome)))
}

/// GET /api/progress-reports/:id
pub async fn get_progress_report(
    State(handlers): State<ReportHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let report = handlers
        .get_handler
        .handle(parse_id(&report_id, "report")?)
        .await?;
    Ok(Json(StoredReportResponse::from(report)))
}
