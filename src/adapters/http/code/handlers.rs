//! HTTP handlers for source-code endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::jobs::JobAcceptedResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::source_code::{
    GenerateSourceCodeCommand, GenerateSourceCodeHandler, GetSourceCodeHandler,
    ListSourceCodesHandler,
};

use super::dto::{GenerateSourceCodeRequest, SourceCodeResponse};

#[derive(Clone)]
pub struct SourceCodeHandlers {
    generate_handler: Arc<GenerateSourceCodeHandler>,
    get_handler: Arc<GetSourceCodeHandler>,
    list_handler: Arc<ListSourceCodesHandler>,
}

impl SourceCodeHandlers {
    pub fn new(state: &AppState) -> Self {
        let repos = &state.repos;
        Self {
            generate_handler: Arc::new(GenerateSourceCodeHandler::new(
                repos.documents.clone(),
                repos.source_codes.clone(),
                repos.jobs.clone(),
                state.generator.clone(),
            )),
            get_handler: Arc::new(GetSourceCodeHandler::new(repos.source_codes.clone())),
            list_handler: Arc::new(ListSourceCodesHandler::new(
                repos.projects.clone(),
                repos.source_codes.clone(),
            )),
        }
    }
}

/// POST /api/documents/:id/source-code - Start code generation
pub async fn generate_source_code(
    State(handlers): State<SourceCodeHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(document_id): Path<String>,
    Json(req): Json<GenerateSourceCodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = GenerateSourceCodeCommand {
        document_id: parse_id(&document_id, "document")?,
        language: req.language,
    };
    let started = handlers.generate_handler.handle(cmd).await?;
    Ok((StatusCode::ACCEPTED, Json(JobAcceptedResponse::from(&started))))
}

/// GET /api/projects/:id/source-codes
pub async fn list_source_codes(
    State(handlers): State<SourceCodeHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let codes = handlers
        .list_handler
        .handle(parse_id(&project_id, "project")?)
        .await?;
    let body: Vec<SourceCodeResponse> = codes.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// GET /api/source-codes/:id
pub async fn get_source_code(
    State(handlers): State<SourceCodeHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(source_code_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let code = handlers
        .get_handler
        .handle(parse_id(&source_code_id, "source code")?)
        .await?;
    Ok(Json(SourceCodeResponse::from(code)))
}
