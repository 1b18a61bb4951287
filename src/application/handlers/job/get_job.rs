//! GetJobHandler - reads the status and progress of a background job.

use std::sync::Arc;

use crate::application::PipelineError;
use crate::domain::foundation::{ErrorCode, JobId};
use crate::domain::job::GenerationJob;
use crate::ports::JobRepository;

pub struct GetJobHandler {
    jobs: Arc<dyn JobRepository>,
}

impl GetJobHandler {
    pub fn new(jobs: Arc<dyn JobRepository>) -> Self {
        Self { jobs }
    }

    pub async fn handle(&self, id: JobId) -> Result<GenerationJob, PipelineError> {
        self.jobs.find_by_id(&id).await?.ok_or_else(|| {
            PipelineError::not_found(ErrorCode::JobNotFound, format!("Job not found: {}", id))
        })
    }
}
