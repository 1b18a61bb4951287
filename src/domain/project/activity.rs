//! Activity log entries feeding the progress report.

use crate::domain::foundation::{ActivityLogId, DomainError, ProjectId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status recorded on an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    NotStarted,
    InProgress,
    Completed,
    Delayed,
    Problem,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::NotStarted => "not_started",
            ActivityStatus::InProgress => "in_progress",
            ActivityStatus::Completed => "completed",
            ActivityStatus::Delayed => "delayed",
            ActivityStatus::Problem => "problem",
        }
    }

    /// Delayed and problem entries surface as report issues.
    pub fn is_issue(&self) -> bool {
        matches!(self, ActivityStatus::Delayed | ActivityStatus::Problem)
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(ActivityStatus::NotStarted),
            "in_progress" => Ok(ActivityStatus::InProgress),
            "completed" => Ok(ActivityStatus::Completed),
            "delayed" => Ok(ActivityStatus::Delayed),
            "problem" => Ok(ActivityStatus::Problem),
            other => Err(DomainError::validation(
                "status",
                format!("Unknown activity status: {}", other),
            )),
        }
    }
}

/// One recorded unit of project activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: ActivityLogId,
    pub project_id: ProjectId,
    pub phase: String,
    pub status: ActivityStatus,
    pub timestamp: Timestamp,
    pub description: String,
}

impl ActivityLog {
    /// Creates a new log entry.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the phase is blank
    pub fn new(
        project_id: ProjectId,
        phase: impl Into<String>,
        status: ActivityStatus,
        timestamp: Timestamp,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let phase = phase.into().trim().to_string();
        if phase.is_empty() {
            return Err(DomainError::validation("phase", "Phase cannot be empty"));
        }
        Ok(Self {
            id: ActivityLogId::new(),
            project_id,
            phase,
            status,
            timestamp,
            description: description.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_through_str() {
        for status in [
            ActivityStatus::NotStarted,
            ActivityStatus::InProgress,
            ActivityStatus::Completed,
            ActivityStatus::Delayed,
            ActivityStatus::Problem,
        ] {
            assert_eq!(status.as_str().parse::<ActivityStatus>().unwrap(), status);
        }
    }

    #[test]
    fn only_delayed_and_problem_are_issues() {
        assert!(ActivityStatus::Delayed.is_issue());
        assert!(ActivityStatus::Problem.is_issue());
        assert!(!ActivityStatus::Completed.is_issue());
        assert!(!ActivityStatus::InProgress.is_issue());
    }

    #[test]
    fn blank_phase_is_rejected() {
        let result = ActivityLog::new(
            ProjectId::new(),
            " ",
            ActivityStatus::Completed,
            Timestamp::now(),
            "",
        );
        assert!(result.is_err());
    }
}
