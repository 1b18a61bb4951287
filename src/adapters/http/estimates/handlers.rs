//! HTTP handlers for work-estimate endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::estimate::{
    GetLatestEstimateHandler, RunWorkEstimateCommand, RunWorkEstimateHandler,
};

use super::dto::WorkEstimateResponse;

#[derive(Clone)]
pub struct EstimateHandlers {
    run_handler: Arc<RunWorkEstimateHandler>,
    latest_handler: Arc<GetLatestEstimateHandler>,
}

impl EstimateHandlers {
    pub fn new(state: &AppState) -> Self {
        let repos = &state.repos;
        Self {
            run_handler: Arc::new(RunWorkEstimateHandler::new(
                repos.projects.clone(),
                repos.documents.clone(),
                repos.source_codes.clone(),
                repos.estimates.clone(),
                state.generator.clone(),
            )),
            latest_handler: Arc::new(GetLatestEstimateHandler::new(repos.estimates.clone())),
        }
    }
}

/// POST /api/projects/:id/work-estimates - Runs the estimate inline
pub async fn run_work_estimate(
    State(handlers): State<EstimateHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RunWorkEstimateCommand {
        project_id: parse_id(&project_id, "project")?,
    };
    let estimate = handlers.run_handler.handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(WorkEstimateResponse::from(estimate))))
}

/// GET /api/projects/:id/work-estimates/latest
pub async fn latest_work_estimate(
    State(handlers): State<EstimateHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let estimate = handlers
        .latest_handler
        .handle(parse_id(&project_id, "project")?)
        .await?;
    Ok(Json(WorkEstimateResponse::from(estimate)))
}
