//! CreateProjectHandler - Command handler for creating projects.

use std::sync::Arc;

use crate::application::PipelineError;
use crate::domain::foundation::UserId;
use crate::domain::project::Project;
use crate::ports::ProjectRepository;

/// Command to create a new project.
#[derive(Debug, Clone)]
pub struct CreateProjectCommand {
    pub user_id: UserId,
    pub name: String,
    pub description: String,
}

/// Handler for creating projects.
pub struct CreateProjectHandler {
    projects: Arc<dyn ProjectRepository>,
}

impl CreateProjectHandler {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn handle(&self, cmd: CreateProjectCommand) -> Result<Project, PipelineError> {
        let project = Project::new(cmd.name, cmd.description, cmd.user_id)?;
        self.projects.save(&project).await?;

        tracing::info!(project_id = %project.id(), "project created");
        Ok(project)
    }
}
