//! HTTP handlers for document endpoints.

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
use crate::application::handlers::document::{
    GenerateDocumentCommand, GenerateDocumentHandler, GetDocumentHandler, ListDocumentsHandler,
    RegisterDocumentCommand, RegisterDocumentHandler,
};

use super::dto::{DocumentResponse, RegisterDocumentRequest};

#[derive(Clone)]
pub struct DocumentHandlers {
    register_handler: Arc<RegisterDocumentHandler>,
    generate_handler: Arc<GenerateDocumentHandler>,
    get_handler: Arc<GetDocumentHandler>,
    list_handler: Arc<ListDocumentsHandler>,
}

impl DocumentHandlers {
    pub fn new(state: &AppState) -> Self {
        let repos = &state.repos;
        Self {
            register_handler: Arc::new(RegisterDocumentHandler::new(
                repos.projects.clone(),
                repos.documents.clone(),
                state.storage.clone(),
                state.buckets.clone(),
            )),
            generate_handler: Arc::new(GenerateDocumentHandler::new(
                repos.documents.clone(),
                repos.jobs.clone(),
                state.storage.clone(),
                state.buckets.uploads.clone(),
                state.generator.clone(),
            )),
            get_handler: Arc::new(GetDocumentHandler::new(repos.documents.clone())),
            list_handler: Arc::new(ListDocumentsHandler::new(
                repos.projects.clone(),
                repos.documents.clone(),
            )),
        }
    }
}

/// POST /api/projects/:id/documents - Register an uploaded document
pub async fn register_document(
    State(handlers): State<DocumentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<String>,
    Json(req): Json<RegisterDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RegisterDocumentCommand {
        project_id: parse_id(&project_id, "project")?,
        user_id: user.id,
        title: req.title,
        doc_type: req.doc_type,
        body: req.content.into_bytes(),
    };
    let document = handlers.register_handler.handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(DocumentResponse::from(&document))))
}

/// GET /api/projects/:id/documents
pub async fn list_documents(
    State(handlers): State<DocumentHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = handlers
        .list_handler
        .handle(parse_id(&project_id, "project")?)
        .await?;
    let body: Vec<DocumentResponse> = documents.iter().map(DocumentResponse::from).collect();
    Ok(Json(body))
}

/// GET /api/documents/:id - Document with its generation progress
pub async fn get_document(
    State(handlers): State<DocumentHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let document = handlers
        .get_handler
        .handle(parse_id(&document_id, "document")?)
        .await?;
    Ok(Json(DocumentResponse::from(&document)))
}

/// POST /api/documents/:id/generate - Start section generation
pub async fn generate_document(
    State(handlers): State<DocumentHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = GenerateDocumentCommand {
        document_id: parse_id(&document_id, "document")?,
    };
    let started = handlers.generate_handler.handle(cmd).await?;
    Ok((StatusCode::ACCEPTED, Json(JobAcceptedResponse::from(&started))))
}
