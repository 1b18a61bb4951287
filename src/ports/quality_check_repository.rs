//! Quality check repository port.
//!
//! Stores both quality and consistency checks.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, QualityCheckId};
use crate::domain::quality::QualityCheck;

#[async_trait]
pub trait QualityCheckRepository: Send + Sync {
    /// Save a new check.
    async fn save(&self, check: &QualityCheck) -> Result<(), DomainError>;

    /// Persist the result and completion time of an existing check.
    ///
    /// # Errors
    ///
    /// - `CheckNotFound` if the check doesn't exist
    async fn update(&self, check: &QualityCheck) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &QualityCheckId) -> Result<Option<QualityCheck>, DomainError>;
}
