//! HTTP DTOs for job endpoints.

use serde::Serialize;

use crate::application::StartedJob;
use crate::domain::job::{GenerationJob, JobKind, JobStatus};

/// Body of every `202 Accepted` that starts a pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct JobAcceptedResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub progress: u8,
}

impl From<&StartedJob> for JobAcceptedResponse {
    fn from(started: &StartedJob) -> Self {
        Self {
            job_id: started.job.id().to_string(),
            status: started.job.status(),
            progress: started.job.progress().value(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobResponse {
    pub id: String,
    pub kind: JobKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub status: JobStatus,
    pub progress: u8,
    /// Id of the row the pipeline produced or updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub complete: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<GenerationJob> for JobResponse {
    fn from(job: GenerationJob) -> Self {
        Self {
            id: job.id().to_string(),
            kind: job.kind(),
            project_id: job.project_id().map(ToString::to_string),
            status: job.status(),
            progress: job.progress().value(),
            target_id: job.target_id().map(str::to_owned),
            fallback: job.fallback(),
            message: job.message().map(str::to_owned),
            complete: job.progress().is_complete(),
            created_at: job.created_at().to_rfc3339(),
            updated_at: job.updated_at().to_rfc3339(),
        }
    }
}
