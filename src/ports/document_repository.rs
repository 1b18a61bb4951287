//! Document repository port.

use async_trait::async_trait;

use crate::domain::document::Document;
use crate::domain::foundation::{DocumentId, DomainError, ProjectId};

/// Repository port for Document aggregate persistence.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Save a new document.
    async fn save(&self, document: &Document) -> Result<(), DomainError>;

    /// Update an existing document's content.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if the document doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, document: &Document) -> Result<(), DomainError>;

    /// Find a document by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, DomainError>;

    /// Find every document whose ID is in `ids`. Missing IDs are skipped.
    async fn find_many(&self, ids: &[DocumentId]) -> Result<Vec<Document>, DomainError>;

    /// All documents of a project, oldest first.
    async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<Document>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn DocumentRepository) {}
    }
}
