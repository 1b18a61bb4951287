//! HTTP handlers for check endpoints.

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
use crate::application::handlers::check::{
    GetCheckHandler, StartConsistencyCheckCommand, StartConsistencyCheckHandler,
    StartQualityCheckCommand, StartQualityCheckHandler,
};
use crate::domain::foundation::DocumentId;

use super::dto::{CheckAcceptedResponse, CheckResponse, ConsistencyCheckRequest};

#[derive(Clone)]
pub struct CheckHandlers {
    quality_handler: Arc<StartQualityCheckHandler>,
    consistency_handler: Arc<StartConsistencyCheckHandler>,
    get_handler: Arc<GetCheckHandler>,
}

impl CheckHandlers {
    pub fn new(state: &AppState) -> Self {
        let repos = &state.repos;
        Self {
            quality_handler: Arc::new(StartQualityCheckHandler::new(
                repos.projects.clone(),
                repos.documents.clone(),
                repos.source_codes.clone(),
                repos.checks.clone(),
                repos.jobs.clone(),
                state.generator.clone(),
            )),
            consistency_handler: Arc::new(StartConsistencyCheckHandler::new(
                repos.documents.clone(),
                repos.checks.clone(),
                repos.jobs.clone(),
                state.generator.clone(),
            )),
            get_handler: Arc::new(GetCheckHandler::new(repos.checks.clone())),
        }
    }
}

/// POST /api/projects/:id/quality-checks
pub async fn start_quality_check(
    State(handlers): State<CheckHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = StartQualityCheckCommand {
        project_id: parse_id(&project_id, "project")?,
    };
    let started = handlers.quality_handler.handle(cmd).await?;
    Ok((StatusCode::ACCEPTED, Json(CheckAcceptedResponse::from(&started))))
}

/// POST /api/consistency-checks
pub async fn start_consistency_check(
    State(handlers): State<CheckHandlers>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<ConsistencyCheckRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let document_ids = req
        .document_ids
        .iter()
        .map(|raw| parse_id::<DocumentId>(raw, "document"))
        .collect::<Result<Vec<_>, _>>()?;
    let started = handlers
        .consistency_handler
        .handle(StartConsistencyCheckCommand { document_ids })
        .await?;
    Ok((StatusCode::ACCEPTED, Json(CheckAcceptedResponse::from(&started))))
}

/// GET /api/checks/:id
pub async fn get_check(
    State(handlers): State<CheckHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(check_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let check = handlers
        .get_handler
        .handle(parse_id(&check_id, "check")?)
        .await?;
    Ok(Json(CheckResponse::from(check)))
}
