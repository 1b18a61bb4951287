//! HTTP handlers for job endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::job::GetJobHandler;

use super::dto::JobResponse;

#[derive(Clone)]
pub struct JobHandlers {
    get_handler: Arc<GetJobHandler>,
}

impl JobHandlers {
    pub fn new(state: &AppState) -> Self {
        Self {
            get_handler: Arc::new(GetJobHandler::new(state.repos.jobs.clone())),
        }
    }
}

/// GET /api/jobs/:id - Poll a pipeline's progress
pub async fn get_job(
    State(handlers): State<JobHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let job = handlers.get_handler.handle(parse_id(&job_id, "job")?).await?;
    Ok(Json(JobResponse::from(job)))
}
