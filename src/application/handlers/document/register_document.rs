//! RegisterDocumentHandler - stores an uploaded body and creates its document row.

use std::sync::Arc;

use crate::application::handlers::project::require_project;
use crate::application::{PipelineError, StorageBuckets};
use crate::domain::document::{DocType, Document};
use crate::domain::foundation::{ProjectId, UserId};
use crate::ports::{DocumentRepository, ObjectStorage, ProjectRepository};

/// Command to register a document for later generation.
#[derive(Debug, Clone)]
pub struct RegisterDocumentCommand {
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub title: String,
    pub doc_type: DocType,
    pub body: Vec<u8>,
}

pub struct RegisterDocumentHandler {
    projects: Arc<dyn ProjectRepository>,
    documents: Arc<dyn DocumentRepository>,
    storage: Arc<dyn ObjectStorage>,
    buckets: StorageBuckets,
}

impl RegisterDocumentHandler {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        documents: Arc<dyn DocumentRepository>,
        storage: Arc<dyn ObjectStorage>,
        buckets: StorageBuckets,
    ) -> Self {
        Self {
            projects,
            documents,
            storage,
            buckets,
        }
    }

    /// Writes the body to `uploads/{user}/{title}` then inserts the row.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the project doesn't exist
    /// - `Domain` if the title is unusable
    /// - `Storage` if the body cannot be written
    pub async fn handle(&self, cmd: RegisterDocumentCommand) -> Result<Document, PipelineError> {
        require_project(self.projects.as_ref(), &cmd.project_id).await?;

        let document = Document::register(cmd.project_id, cmd.user_id, cmd.doc_type, cmd.title)?;
        let stored = self
            .storage
            .put(
                &self.buckets.uploads,
                &document.storage_key(),
                &cmd.body,
                document.doc_type().content_type(),
            )
            .await?;
        self.documents.save(&document).await?;

        tracing::info!(
            document_id = %document.id(),
            key = %stored.key,
            size_bytes = stored.size_bytes,
            "document registered"
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::storage::InMemoryObjectStorage;
    use crate::domain::project::Project;

    async fn setup() -> (Arc<InMemoryStore>, InMemoryObjectStorage, Project) {
        let store = Arc::new(InMemoryStore::new());
        let project = Project::new("Portal", "", UserId::new("u-1").unwrap()).unwrap();
        ProjectRepository::save(store.as_ref(), &project).await.unwrap();
        (store, InMemoryObjectStorage::new(), project)
    }

    fn handler(store: &Arc<InMemoryStore>, storage: &InMemoryObjectStorage) -> RegisterDocumentHandler {
        RegisterDocumentHandler::new(
            store.clone(),
            store.clone(),
            Arc::new(storage.clone()),
            StorageBuckets::default(),
        )
    }

    fn command(project_id: ProjectId, title: &str) -> RegisterDocumentCommand {
        RegisterDocumentCommand {
            project_id,
            user_id: UserId::new("u-1").unwrap(),
            title: title.to_string(),
            doc_type: DocType::Text,
            body: b"Users can log in.".to_vec(),
        }
    }

    #[tokio::test]
    async fn stores_body_under_user_and_title() {
        let (store, storage, project) = setup().await;

        let document = handler(&store, &storage)
            .handle(command(*project.id(), "requirements.txt"))
            .await
            .unwrap();

        let body = storage.get("uploads", "u-1/requirements.txt").await.unwrap();
        assert_eq!(body, b"Users can log in.");
        assert!(document.content().sections.is_empty());
        assert_eq!(document.content().progress.value(), 0);
        assert!(DocumentRepository::find_by_id(store.as_ref(), document.id())
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn unknown_project_writes_nothing() {
        let (store, storage, _) = setup().await;

        let err = handler(&store, &storage)
            .handle(command(ProjectId::new(), "requirements.txt"))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::NotFound(_)));
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn path_like_title_is_rejected() {
        let (store, storage, project) = setup().await;

        let err = handler(&store, &storage)
            .handle(command(*project.id(), "../etc/passwd"))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Domain(_)));
    }
}
