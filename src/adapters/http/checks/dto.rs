//! HTTP DTOs for check endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::check::StartedCheck;
use crate::domain::quality::{CheckKind, Issue, QualityCheck, Suggestion};

#[derive(Debug, Clone, Deserialize)]
pub struct ConsistencyCheckRequest {
    pub document_ids: Vec<String>,
}

/// Returned when a check pipeline starts; poll either id.
#[derive(Debug, Clone, Serialize)]
pub struct CheckAcceptedResponse {
    pub check_id: String,
    pub job_id: String,
}

impl From<&StartedCheck> for CheckAcceptedResponse {
    fn from(started: &StartedCheck) -> Self {
        Self {
            check_id: started.check.id().to_string(),
            job_id: started.started.job.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    pub id: String,
    pub project_id: String,
    pub kind: CheckKind,
    pub score: u8,
    pub issues: Vec<Issue>,
    pub suggestions: Vec<Suggestion>,
    pub complete: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl From<QualityCheck> for CheckResponse {
    fn from(check: QualityCheck) -> Self {
        let result = check.result();
        Self {
            id: check.id().to_string(),
            project_id: check.project_id().to_string(),
            kind: check.kind(),
            score: result.score.value(),
            issues: result.issues.clone(),
            suggestions: result.suggestions.clone(),
            complete: check.is_complete(),
            created_at: check.created_at().to_rfc3339(),
            completed_at: check.completed_at().map(|t| t.to_rfc3339()),
        }
    }
}
