//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the project-management domain.

mod auth;
mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    ActivityLogId, DocumentId, JobId, ProgressReportId, ProjectId, ProposalId, QualityCheckId,
    SourceCodeId, TemplateId, UserId, WorkEstimateId,
};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
