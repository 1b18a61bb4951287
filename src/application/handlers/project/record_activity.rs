//! RecordActivityHandler - appends an activity log entry to a project.

use std::sync::Arc;

use super::require_project;
use crate::application::PipelineError;
use crate::domain::foundation::{ProjectId, Timestamp};
use crate::domain::project::{ActivityLog, ActivityStatus};
use crate::ports::ProjectRepository;

#[derive(Debug, Clone)]
pub struct RecordActivityCommand {
    pub project_id: ProjectId,
    pub phase: String,
    pub status: ActivityStatus,
    /// Defaults to now.
    pub timestamp: Option<Timestamp>,
    pub description: String,
}

pub struct RecordActivityHandler {
    projects: Arc<dyn ProjectRepository>,
}

impl RecordActivityHandler {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn handle(&self, cmd: RecordActivityCommand) -> Result<ActivityLog, PipelineError> {
        require_project(self.projects.as_ref(), &cmd.project_id).await?;

        let log = ActivityLog::new(
            cmd.project_id,
            cmd.phase,
            cmd.status,
            cmd.timestamp.unwrap_or_else(Timestamp::now),
            cmd.description,
        )?;
        self.projects.record_activity(&log).await?;

        tracing::debug!(project_id = %log.project_id, phase = %log.phase, status = %log.status, "activity recorded");
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::UserId;
    use crate::domain::project::Project;

    #[tokio::test]
    async fn records_log_for_existing_project() {
        let store = Arc::new(InMemoryStore::new());
        let project = Project::new("Portal", "", UserId::new("u").unwrap()).unwrap();
        store.save(&project).await.unwrap();

        let at = Timestamp::now();
        let log = RecordActivityHandler::new(store.clone())
            .handle(RecordActivityCommand {
                project_id: *project.id(),
                phase: "design".into(),
                status: ActivityStatus::Delayed,
                timestamp: Some(at),
                description: "Waiting on review".into(),
            })
            .await
            .unwrap();

        let logs = store
            .activity_between(project.id(), &at.add_days(-1), &at.add_days(1))
            .await
            .unwrap();
        assert_eq!(logs, vec![log]);
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let err = RecordActivityHandler::new(Arc::new(InMemoryStore::new()))
            .handle(RecordActivityCommand {
                project_id: ProjectId::new(),
                phase: "design".into(),
                status: ActivityStatus::Completed,
                timestamp: None,
                description: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }
}
