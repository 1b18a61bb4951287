//! Work estimate repository port.

use async_trait::async_trait;

use crate::domain::estimate::WorkEstimate;
use crate::domain::foundation::{DomainError, ProjectId};

#[async_trait]
pub trait WorkEstimateRepository: Send + Sync {
    async fn save(&self, estimate: &WorkEstimate) -> Result<(), DomainError>;

    /// Most recent estimate for a project.
    async fn latest_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Option<WorkEstimate>, DomainError>;

    /// `total_hours` of up to `limit` estimates from projects other than
    /// `project_id`, newest first.
    async fn recent_totals_excluding(
        &self,
        project_id: &ProjectId,
        limit: usize,
    ) -> Result<Vec<f64>, DomainError>;
}
