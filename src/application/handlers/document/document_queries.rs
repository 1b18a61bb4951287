//! Document read handlers.

use std::sync::Arc;

use crate::application::handlers::project::require_project;
use crate::application::PipelineError;
use crate::domain::document::Document;
use crate::domain::foundation::{DocumentId, ErrorCode, ProjectId};
use crate::ports::{DocumentRepository, ProjectRepository};

pub struct GetDocumentHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl GetDocumentHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub async fn handle(&self, document_id: DocumentId) -> Result<Document, PipelineError> {
        self.documents.find_by_id(&document_id).await?.ok_or_else(|| {
            PipelineError::not_found(
                ErrorCode::DocumentNotFound,
                format!("Document not found: {}", document_id),
            )
        })
    }
}

/// Lists a project's documents, oldest first.
pub struct ListDocumentsHandler {
    projects: Arc<dyn ProjectRepository>,
    documents: Arc<dyn DocumentRepository>,
}

impl ListDocumentsHandler {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        documents: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            projects,
            documents,
        }
    }

    pub async fn handle(&self, project_id: ProjectId) -> Result<Vec<Document>, PipelineError> {
        require_project(self.projects.as_ref(), &project_id).await?;
        Ok(self.documents.find_by_project(&project_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::testing::{seed_generated, seed_project};

    #[tokio::test]
    async fn lists_only_the_projects_documents() {
        let store = Arc::new(InMemoryStore::new());
        let project = seed_project(&store).await;
        let other = seed_project(&store).await;
        let mine = seed_generated(&store, &project, "brief.txt", &[("Scope", "All")]).await;
        seed_generated(&store, &other, "other.txt", &[]).await;

        let documents = ListDocumentsHandler::new(store.clone(), store.clone())
            .handle(*project.id())
            .await
            .unwrap();

        assert_eq!(documents, vec![mine.clone()]);
        let fetched = GetDocumentHandler::new(store).handle(*mine.id()).await.unwrap();
        assert_eq!(fetched.content().sections.len(), 1);
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let err = GetDocumentHandler::new(Arc::new(InMemoryStore::new()))
            .handle(DocumentId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }
}
