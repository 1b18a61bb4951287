//! Source code repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId, SourceCodeId};
use crate::domain::source_code::SourceCode;

#[async_trait]
pub trait SourceCodeRepository: Send + Sync {
    async fn save(&self, source_code: &SourceCode) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &SourceCodeId) -> Result<Option<SourceCode>, DomainError>;

    /// All source files of a project, oldest first.
    async fn find_by_project(&self, project_id: &ProjectId)
        -> Result<Vec<SourceCode>, DomainError>;
}
