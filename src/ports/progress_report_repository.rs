//! Progress report repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProgressReportId};
use crate::domain::report::ProgressReport;

#[async_trait]
pub trait ProgressReportRepository: Send + Sync {
    async fn save(&self, report: &ProgressReport) -> Result<(), DomainError>;

    async fn find_by_id(
        &self,
        id: &ProgressReportId,
    ) -> Result<Option<ProgressReport>, DomainError>;
}
