//! Project command and query handlers.

mod create_project;
mod project_queries;
mod record_activity;

pub use create_project::{CreateProjectCommand, CreateProjectHandler};
pub use project_queries::{
    GetProjectHandler, GetProjectQuery, ListProjectsHandler, ListTemplatesHandler,
};
pub use record_activity::{RecordActivityCommand, RecordActivityHandler};

use crate::application::PipelineError;
use crate::domain::foundation::{ErrorCode, ProjectId};
use crate::domain::project::Project;
use crate::ports::ProjectRepository;

/// Loads a project or fails with `ProjectNotFound`.
pub(crate) async fn require_project(
    projects: &dyn ProjectRepository,
    project_id: &ProjectId,
) -> Result<Project, PipelineError> {
    projects.find_by_id(project_id).await?.ok_or_else(|| {
        PipelineError::not_found(
            ErrorCode::ProjectNotFound,
            format!("Project not found: {}", project_id),
        )
    })
}
