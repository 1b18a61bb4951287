//! Generation job repository port.
//!
//! Jobs are written at every pipeline checkpoint, so `update` is the hot
//! path. Implementations store the whole job row on each call.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, JobId};
use crate::domain::job::GenerationJob;

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Save a new job.
    async fn save(&self, job: &GenerationJob) -> Result<(), DomainError>;

    /// Overwrite an existing job.
    ///
    /// # Errors
    ///
    /// - `JobNotFound` if the job doesn't exist
    async fn update(&self, job: &GenerationJob) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &JobId) -> Result<Option<GenerationJob>, DomainError>;
}
