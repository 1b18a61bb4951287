//! HTTP DTOs for project endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::project::{ActivityLog, ActivityStatus, Project, Template};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request to record one activity log entry.
///
/// `timestamp` defaults to the time the request is handled.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordActivityRequest {
    pub phase: String,
    pub status: ActivityStatus,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub description: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_by: String,
    pub created_at: String,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().to_string(),
            name: project.name().to_string(),
            description: project.description().to_string(),
            created_by: project.created_by().to_string(),
            created_at: project.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl From<Template> for TemplateResponse {
    fn from(template: Template) -> Self {
        Self {
            id: template.id.to_string(),
            name: template.name,
            content: template.content,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityLogResponse {
    pub id: String,
    pub project_id: String,
    pub phase: String,
    pub status: ActivityStatus,
    pub timestamp: String,
    pub description: String,
}

impl From<ActivityLog> for ActivityLogResponse {
    fn from(log: ActivityLog) -> Self {
        Self {
            id: log.id.to_string(),
            project_id: log.project_id.to_string(),
            phase: log.phase,
            status: log.status,
            timestamp: log.timestamp.to_rfc3339(),
            description: log.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_request_accepts_snake_case_status() {
        let req: RecordActivityRequest =
            serde_json::from_str(r#"{"phase":"build","status":"in_progress"}"#).unwrap();
        assert_eq!(req.status, ActivityStatus::InProgress);
        assert!(req.timestamp.is_none());
        assert!(req.description.is_empty());
    }

    #[test]
    fn project_description_is_optional() {
        let req: CreateProjectRequest = serde_json::from_str(r#"{"name":"Pilot"}"#).unwrap();
        assert_eq!(req.description, "");
    }
}
