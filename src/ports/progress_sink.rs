//! Progress sink port.
//!
//! Pipelines report checkpoints through this trait. Background jobs write
//! them to the job record; synchronous runs discard them.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::job::Checkpoint;

#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Record that the pipeline reached `checkpoint`.
    async fn advance(&self, checkpoint: Checkpoint) -> Result<(), DomainError>;

    /// Record the ID of the row the pipeline is producing.
    async fn set_target(&self, target_id: String) -> Result<(), DomainError>;
}

/// Sink for pipelines that run inline with the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressSink for NoopProgress {
    async fn advance(&self, _checkpoint: Checkpoint) -> Result<(), DomainError> {
        Ok(())
    }

    async fn set_target(&self, _target_id: String) -> Result<(), DomainError> {
        Ok(())
    }
}
