//! HTTP routes for project endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_project, get_project, list_projects, list_templates, record_activity,
    ProjectHandlers,
};

pub fn project_routes(handlers: ProjectHandlers) -> Router {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/:id", get(get_project))
        .route("/projects/:id/activity-logs", post(record_activity))
        .route("/templates", get(list_templates))
        .with_state(handlers)
}
