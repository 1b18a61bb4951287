//! GetLatestEstimateHandler - most recent work estimate of a project.

use std::sync::Arc;

use crate::application::PipelineError;
use crate::domain::estimate::WorkEstimate;
use crate::domain::foundation::{ErrorCode, ProjectId};
use crate::ports::WorkEstimateRepository;

pub struct GetLatestEstimateHandler {
    estimates: Arc<dyn WorkEstimateRepository>,
}

impl GetLatestEstimateHandler {
    pub fn new(estimates: Arc<dyn WorkEstimateRepository>) -> Self {
        Self { estimates }
    }

    pub async fn handle(&self, project_id: ProjectId) -> Result<WorkEstimate, PipelineError> {
        self.estimates
            .latest_for_project(&project_id)
            .await?
            .ok_or_else(|| {
                PipelineError::not_found(
                    ErrorCode::EstimateNotFound,
                    format!("No work estimate for project {}", project_id),
                )
            })
    }
}
