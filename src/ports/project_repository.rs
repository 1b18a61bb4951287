//! Project repository port.
//!
//! Covers projects together with the two small record types hanging off
//! them: proposal templates and activity logs.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId, TemplateId, Timestamp};
use crate::domain::project::{ActivityLog, Project, Template};

/// Repository port for projects, templates and activity logs.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Save a new project.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, project: &Project) -> Result<(), DomainError>;

    /// Find a project by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError>;

    /// All projects, newest first.
    async fn list(&self) -> Result<Vec<Project>, DomainError>;

    /// All templates ordered by name.
    async fn list_templates(&self) -> Result<Vec<Template>, DomainError>;

    /// Find a template by its ID. Returns `None` if not found.
    async fn find_template(&self, id: &TemplateId) -> Result<Option<Template>, DomainError>;

    /// Save a new template.
    async fn save_template(&self, template: &Template) -> Result<(), DomainError>;

    /// Record an activity log entry.
    async fn record_activity(&self, log: &ActivityLog) -> Result<(), DomainError>;

    /// Logs for a project with `start <= timestamp <= end`, oldest first.
    async fn activity_between(
        &self,
        project_id: &ProjectId,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<Vec<ActivityLog>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProjectRepository) {}
    }
}
