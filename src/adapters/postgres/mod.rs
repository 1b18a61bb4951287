//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! Each repository maps one aggregate to one table (see `migrations/`).
//! Structured values (document sections, check results, estimate
//! breakdowns, report snapshots) are stored as JSONB.

mod check_repository;
mod document_repository;
mod estimate_repository;
mod job_repository;
mod project_repository;
mod proposal_repository;
mod report_repository;
mod source_code_repository;

pub use check_repository::PostgresQualityCheckRepository;
pub use document_repository::PostgresDocumentRepository;
pub use estimate_repository::PostgresWorkEstimateRepository;
pub use job_repository::PostgresJobRepository;
pub use project_repository::PostgresProjectRepository;
pub use proposal_repository::PostgresProposalRepository;
pub use report_repository::PostgresProgressReportRepository;
pub use source_code_repository::PostgresSourceCodeRepository;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

fn row_error(e: sqlx::Error) -> DomainError {
    DomainError::database("Failed to read column", e)
}

fn parse_user_id(raw: &str) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id in row: {}", e))
    })
}
