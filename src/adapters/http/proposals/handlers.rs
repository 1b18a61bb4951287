//! HTTP handlers for proposal endpoints.

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
use crate::application::handlers::proposal::{
    CreateProposalCommand, CreateProposalHandler, GetProposalHandler,
};

use super::dto::{CreateProposalRequest, ProposalResponse};

#[derive(Clone)]
pub struct ProposalHandlers {
    create_handler: Arc<CreateProposalHandler>,
    get_handler: Arc<GetProposalHandler>,
}

impl ProposalHandlers {
    pub fn new(state: &AppState) -> Self {
        let repos = &state.repos;
        Self {
            create_handler: Arc::new(CreateProposalHandler::new(
                repos.projects.clone(),
                repos.documents.clone(),
                repos.proposals.clone(),
                repos.jobs.clone(),
                state.storage.clone(),
                state.buckets.proposals.clone(),
                state.generator.clone(),
            )),
            get_handler: Arc::new(GetProposalHandler::new(repos.proposals.clone())),
        }
    }
}

/// POST /api/projects/:id/proposals - Start proposal drafting
pub async fn create_proposal(
    State(handlers): State<ProposalHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(project_id): Path<String>,
    Json(req): Json<CreateProposalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateProposalCommand {
        project_id: parse_id(&project_id, "project")?,
        template_id: parse_id(&req.template_id, "template")?,
    };
    let started = handlers.create_handler.handle(cmd).await?;
    Ok((StatusCode::ACCEPTED, Json(JobAcceptedResponse::from(&started))))
}

/// GET /api/proposals/:id
pub async fn get_proposal(
    State(handlers): State<ProposalHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(proposal_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let proposal = handlers
        .get_handler
        .handle(parse_id(&proposal_id, "proposal")?)
        .await?;
    Ok(Json(ProposalResponse::from(proposal)))
}
