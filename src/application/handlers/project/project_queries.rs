//! Project read handlers: list, get and template listing.

use std::sync::Arc;

use super::require_project;
use crate::application::PipelineError;
use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, Template};
use crate::ports::ProjectRepository;

/// Lists every project, newest first.
pub struct ListProjectsHandler {
    projects: Arc<dyn ProjectRepository>,
}

impl ListProjectsHandler {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn handle(&self) -> Result<Vec<Project>, PipelineError> {
        Ok(self.projects.list().await?)
    }
}

/// Query to get a project by ID.
#[derive(Debug, Clone)]
pub struct GetProjectQuery {
    pub project_id: ProjectId,
}

pub struct GetProjectHandler {
    projects: Arc<dyn ProjectRepository>,
}

impl GetProjectHandler {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn handle(&self, query: GetProjectQuery) -> Result<Project, PipelineError> {
        require_project(self.projects.as_ref(), &query.project_id).await
    }
}

/// Lists proposal templates by name.
pub struct ListTemplatesHandler {
    projects: Arc<dyn ProjectRepository>,
}

impl ListTemplatesHandler {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn handle(&self) -> Result<Vec<Template>, PipelineError> {
        Ok(self.projects.list_templates().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::UserId;

    #[tokio::test]
    async fn get_returns_not_found_for_unknown_project() {
        let handler = GetProjectHandler::new(Arc::new(InMemoryStore::new()));

        let err = handler
            .handle(GetProjectQuery {
                project_id: ProjectId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }

    #[tokio::test]
    async fn lists_saved_projects_and_templates() {
        let store = Arc::new(InMemoryStore::new());
        let project = Project::new("Billing", "", UserId::new("u").unwrap()).unwrap();
        store.save(&project).await.unwrap();
        store
            .save_template(&Template::new("Standard", "# Proposal"))
            .await
            .unwrap();

        let projects = ListProjectsHandler::new(store.clone()).handle().await.unwrap();
        let templates = ListTemplatesHandler::new(store.clone()).handle().await.unwrap();

        assert_eq!(projects, vec![project.clone()]);
        assert_eq!(templates[0].name, "Standard");

        let fetched = GetProjectHandler::new(store)
            .handle(GetProjectQuery {
                project_id: *project.id(),
            })
            .await
            .unwrap();
        assert_eq!(fetched, project);
    }
}
