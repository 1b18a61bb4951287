//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers validate requests against the repositories and either answer
//! directly or hand a [`Pipeline`] to the job runner, which tracks its
//! checkpoints on a [`GenerationJob`](crate::domain::job::GenerationJob).

mod content_generator;
mod job_runner;
pub mod handlers;

#[cfg(test)]
pub(crate) mod testing;

pub use content_generator::{
    extract_json, parse_json, strip_code_fences, ContentGenerator, DEFAULT_MAX_TOKENS,
};
pub use job_runner::{
    spawn_pipeline, JobTracker, Pipeline, PipelineError, PipelineOutcome, StartedJob,
};

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Bucket names used for object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageBuckets {
    pub uploads: String,
    pub proposals: String,
}

impl Default for StorageBuckets {
    fn default() -> Self {
        Self {
            uploads: "uploads".to_string(),
            proposals: "proposals".to_string(),
        }
    }
}

/// Serializes a value for embedding in a prompt.
pub(crate) fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String, PipelineError> {
    serde_json::to_string(value).map_err(|e| {
        PipelineError::Domain(DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to encode prompt input: {}", e),
        ))
    })
}
