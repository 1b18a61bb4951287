//! HTTP DTOs for work-estimate endpoints.

use serde::Serialize;

use crate::domain::estimate::{PhaseEstimate, WorkEstimate};

#[derive(Debug, Clone, Serialize)]
pub struct WorkEstimateResponse {
    pub id: String,
    pub project_id: String,
    pub total_hours: f64,
    pub breakdown: Vec<PhaseEstimate>,
    /// True when at least one phase used the default hours.
    pub fallback: bool,
    pub created_at: String,
}

impl From<WorkEstimate> for WorkEstimateResponse {
    fn from(estimate: WorkEstimate) -> Self {
        let fallback = estimate.estimate.used_fallback();
        Self {
            id: estimate.id.to_string(),
            project_id: estimate.project_id.to_string(),
            total_hours: estimate.estimate.total_hours,
            breakdown: estimate.estimate.breakdown,
            fallback,
            created_at: estimate.created_at.to_rfc3339(),
        }
    }
}
