//! Source code read handlers.

use std::sync::Arc;

use crate::application::handlers::project::require_project;
use crate::application::PipelineError;
use crate::domain::foundation::{ErrorCode, ProjectId, SourceCodeId};
use crate::domain::source_code::SourceCode;
use crate::ports::{ProjectRepository, SourceCodeRepository};

pub struct GetSourceCodeHandler {
    source_codes: Arc<dyn SourceCodeRepository>,
}

impl GetSourceCodeHandler {
    pub fn new(source_codes: Arc<dyn SourceCodeRepository>) -> Self {
        Self { source_codes }
    }

    pub async fn handle(&self, id: SourceCodeId) -> Result<SourceCode, PipelineError> {
        self.source_codes.find_by_id(&id).await?.ok_or_else(|| {
            PipelineError::not_found(
                ErrorCode::SourceCodeNotFound,
                format!("Source code not found: {}", id),
            )
        })
    }
}

pub struct ListSourceCodesHandler {
    projects: Arc<dyn ProjectRepository>,
    source_codes: Arc<dyn SourceCodeRepository>,
}

impl ListSourceCodesHandler {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        source_codes: Arc<dyn SourceCodeRepository>,
    ) -> Self {
        Self {
            projects,
            source_codes,
        }
    }

    pub async fn handle(&self, project_id: ProjectId) -> Result<Vec<SourceCode>, PipelineError> {
        require_project(self.projects.as_ref(), &project_id).await?;
        Ok(self.source_codes.find_by_project(&project_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::testing::seed_project;
    use crate::domain::source_code::Language;

    #[tokio::test]
    async fn lists_and_fetches_saved_code() {
        let store = Arc::new(InMemoryStore::new());
        let project = seed_project(&store).await;
        let code = SourceCode::generated(*project.id(), "main", Language::TypeScript, "let x = 1;").unwrap();
        SourceCodeRepository::save(store.as_ref(), &code).await.unwrap();

        let listed = ListSourceCodesHandler::new(store.clone(), store.clone())
            .handle(*project.id())
            .await
            .unwrap();
        assert_eq!(listed, vec![code.clone()]);

        let fetched = GetSourceCodeHandler::new(store).handle(code.id).await.unwrap();
        assert_eq!(fetched.file_name, "main.ts");
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = ListSourceCodesHandler::new(store.clone(), store)
            .handle(ProjectId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }
}
