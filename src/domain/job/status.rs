//! Job status and kind enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::DomainError;

/// Lifecycle status of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Completed and failed jobs accept no further changes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Pending -> Running | Completed | Failed
    /// - Running -> Running | Completed | Failed
    pub fn can_transition_to(&self, target: &JobStatus) -> bool {
        use JobStatus::*;
        matches!(
            (self, target),
            (Pending, Running)
                | (Pending, Completed)
                | (Pending, Failed)
                | (Running, Running)
                | (Running, Completed)
                | (Running, Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "running" => Ok(JobStatus::Running),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            other => Err(DomainError::validation(
                "status",
                format!("Unknown job status: {}", other),
            )),
        }
    }
}

/// Which pipeline a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    DocumentGeneration,
    SourceCodeGeneration,
    QualityCheck,
    ConsistencyCheck,
    ProposalCreation,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::DocumentGeneration => "document_generation",
            JobKind::SourceCodeGeneration => "source_code_generation",
            JobKind::QualityCheck => "quality_check",
            JobKind::ConsistencyCheck => "consistency_check",
            JobKind::ProposalCreation => "proposal_creation",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document_generation" => Ok(JobKind::DocumentGeneration),
            "source_code_generation" => Ok(JobKind::SourceCodeGeneration),
            "quality_check" => Ok(JobKind::QualityCheck),
            "consistency_check" => Ok(JobKind::ConsistencyCheck),
            "proposal_creation" => Ok(JobKind::ProposalCreation),
            other => Err(DomainError::validation(
                "kind",
                format!("Unknown job kind: {}", other),
            )),
        }
    }
}
