//! HTTP handlers for project endpoints.

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
use crate::application::handlers::project::{
    CreateProjectCommand, CreateProjectHandler, GetProjectHandler, GetProjectQuery,
    ListProjectsHandler, ListTemplatesHandler, RecordActivityCommand, RecordActivityHandler,
};
use crate::domain::foundation::ProjectId;

use super::dto::{
    ActivityLogResponse, CreateProjectRequest, ProjectResponse, RecordActivityRequest,
    TemplateResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProjectHandlers {
    create_handler: Arc<CreateProjectHandler>,
    list_handler: Arc<ListProjectsHandler>,
    get_handler: Arc<GetProjectHandler>,
    templates_handler: Arc<ListTemplatesHandler>,
    activity_handler: Arc<RecordActivityHandler>,
}

impl ProjectHandlers {
    pub fn new(state: &AppState) -> Self {
        let projects = state.repos.projects.clone();
        Self {
            create_handler: Arc::new(CreateProjectHandler::new(projects.clone())),
            list_handler: Arc::new(ListProjectsHandler::new(projects.clone())),
            get_handler: Arc::new(GetProjectHandler::new(projects.clone())),
            templates_handler: Arc::new(ListTemplatesHandler::new(projects.clone())),
            activity_handler: Arc::new(RecordActivityHandler::new(projects)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/projects
pub async fn create_project(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateProjectCommand {
        user_id: user.id,
        name: req.name,
        description: req.description,
    };
    let project = handlers.create_handler.handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(&project))))
}

/// GET /api/projects
pub async fn list_projects(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let projects = handlers.list_handler.handle().await?;
    let body: Vec<ProjectResponse> = projects.iter().map(ProjectResponse::from).collect();
    Ok(Json(body))
}

/// GET /api/projects/:id
pub async fn get_project(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let project_id: ProjectId = parse_id(&project_id, "project")?;
    let project = handlers
        .get_handler
        .handle(GetProjectQuery { project_id })
        .await?;
    Ok(Json(ProjectResponse::from(&project)))
}

/// GET /api/templates
pub async fn list_templates(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let templates = handlers.templates_handler.handle().await?;
    let body: Vec<TemplateResponse> = templates.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// POST /api/projects/:id/activity-logs
pub async fn record_activity(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(project_id): Path<String>,
    Json(req): Json<RecordActivityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RecordActivityCommand {
        project_id: parse_id(&project_id, "project")?,
        phase: req.phase,
        status: req.status,
        timestamp: req.timestamp,
        description: req.description,
    };
    let log = handlers.activity_handler.handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(ActivityLogResponse::from(log))))
}
