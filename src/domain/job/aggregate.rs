//! GenerationJob aggregate.
//!
//! A job tracks one background pipeline run. Clients poll it until
//! `progress` reaches 100.

use serde::{Deserialize, Serialize};

use super::{JobKind, JobStatus};
use crate::domain::foundation::{DomainError, ErrorCode, JobId, Percentage, ProjectId, Timestamp};

/// A fixed progress point a pipeline reports when it finishes a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub label: &'static str,
    pub progress: Percentage,
}

impl Checkpoint {
    pub const fn new(label: &'static str, progress: u8) -> Self {
        Self {
            label,
            progress: Percentage::new(progress),
        }
    }
}

/// GenerationJob aggregate.
///
/// # Invariants
///
/// - `progress` never decreases
/// - once `status` is terminal no field changes
/// - a completed job has progress 100
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationJob {
    id: JobId,
    kind: JobKind,
    project_id: Option<ProjectId>,
    status: JobStatus,
    progress: Percentage,
    target_id: Option<String>,
    fallback: bool,
    message: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl GenerationJob {
    /// Creates a pending job at 0%.
    pub fn new(kind: JobKind, project_id: Option<ProjectId>) -> Self {
        let now = Timestamp::now();
        Self {
            id: JobId::new(),
            kind,
            project_id,
            status: JobStatus::Pending,
            progress: Percentage::ZERO,
            target_id: None,
            fallback: false,
            message: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a job from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: JobId,
        kind: JobKind,
        project_id: Option<ProjectId>,
        status: JobStatus,
        progress: Percentage,
        target_id: Option<String>,
        fallback: bool,
        message: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            kind,
            project_id,
            status,
            progress,
            target_id,
            fallback,
            message,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn progress(&self) -> Percentage {
        self.progress
    }

    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    pub fn fallback(&self) -> bool {
        self.fallback
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────

    /// Records that the pipeline reached `checkpoint`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the job is terminal or the checkpoint
    ///   is below the current progress
    pub fn advance(&mut self, checkpoint: Checkpoint) -> Result<(), DomainError> {
        self.ensure_transition(JobStatus::Running)?;
        if checkpoint.progress < self.progress {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Progress cannot move backwards from {} to {}",
                    self.progress, checkpoint.progress
                ),
            ));
        }
        self.status = JobStatus::Running;
        self.progress = checkpoint.progress;
        self.message = Some(checkpoint.label.to_string());
        self.touch();
        Ok(())
    }

    /// Records the target the pipeline is working on (e.g. the check id).
    pub fn set_target(&mut self, target_id: impl Into<String>) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(self.terminal_error());
        }
        self.target_id = Some(target_id.into());
        self.touch();
        Ok(())
    }

    /// Marks the job completed at 100%.
    pub fn complete(
        &mut self,
        target_id: Option<String>,
        fallback_reason: Option<String>,
    ) -> Result<(), DomainError> {
        self.ensure_transition(JobStatus::Completed)?;
        self.status = JobStatus::Completed;
        self.progress = Percentage::HUNDRED;
        if target_id.is_some() {
            self.target_id = target_id;
        }
        self.fallback = fallback_reason.is_some();
        self.message = fallback_reason.or_else(|| Some("completed".to_string()));
        self.touch();
        Ok(())
    }

    /// Marks the job failed, keeping the last progress value.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.ensure_transition(JobStatus::Failed)?;
        self.status = JobStatus::Failed;
        self.message = Some(reason.into());
        self.touch();
        Ok(())
    }

    fn ensure_transition(&self, target: JobStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(&target) {
            Ok(())
        } else {
            Err(self.terminal_error())
        }
    }

    fn terminal_error(&self) -> DomainError {
        DomainError::new(
            ErrorCode::InvalidStateTransition,
            format!("Job {} is already {}", self.id, self.status),
        )
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOADED: Checkpoint = Checkpoint::new("loaded", 20);
    const GENERATED: Checkpoint = Checkpoint::new("generated", 80);

    fn job() -> GenerationJob {
        GenerationJob::new(JobKind::DocumentGeneration, Some(ProjectId::new()))
    }

    #[test]
    fn new_job_is_pending_at_zero() {
        let job = job();
        assert_eq!(job.status(), JobStatus::Pending);
        assert_eq!(job.progress(), Percentage::ZERO);
        assert!(!job.fallback());
    }

    #[test]
    fn advance_moves_to_running() {
        let mut job = job();
        job.advance(LOADED).unwrap();
        assert_eq!(job.status(), JobStatus::Running);
        assert_eq!(job.progress().value(), 20);
        assert_eq!(job.message(), Some("loaded"));
    }

    #[test]
    fn progress_cannot_decrease() {
        let mut job = job();
        job.advance(GENERATED).unwrap();
        let err = job.advance(LOADED).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(job.progress().value(), 80);
    }

    #[test]
    fn complete_sets_hundred_and_fallback_flag() {
        let mut job = job();
        job.advance(LOADED).unwrap();
        job.complete(Some("doc-1".into()), Some("llm unavailable".into()))
            .unwrap();
        assert_eq!(job.status(), JobStatus::Completed);
        assert!(job.progress().is_complete());
        assert!(job.fallback());
        assert_eq!(job.target_id(), Some("doc-1"));
        assert_eq!(job.message(), Some("llm unavailable"));
    }

    #[test]
    fn complete_keeps_existing_target_when_none_given() {
        let mut job = job();
        job.set_target("check-1").unwrap();
        job.complete(None, None).unwrap();
        assert_eq!(job.target_id(), Some("check-1"));
        assert!(!job.fallback());
    }

    #[test]
    fn terminal_job_rejects_changes() {
        let mut job = job();
        job.fail("storage down").unwrap();
        assert!(job.advance(GENERATED).is_err());
        assert!(job.complete(None, None).is_err());
        assert!(job.set_target("x").is_err());
        assert_eq!(job.message(), Some("storage down"));
    }

    #[test]
    fn failed_job_keeps_last_progress() {
        let mut job = job();
        job.advance(LOADED).unwrap();
        job.fail("boom").unwrap();
        assert_eq!(job.progress().value(), 20);
    }
}
