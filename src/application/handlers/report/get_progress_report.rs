//! GetProgressReportHandler - reads a stored progress report.

use std::sync::Arc;

use crate::application::PipelineError;
use crate::domain::foundation::{ErrorCode, ProgressReportId};
use crate::domain::report::ProgressReport;
use crate::ports::ProgressReportRepository;

pub struct GetProgressReportHandler {
    reports: Arc<dyn ProgressReportRepository>,
}

impl GetProgressReportHandler {
    pub fn new(reports: Arc<dyn ProgressReportRepository>) -> Self {
        Self { reports }
    }

    pub async fn handle(&self, id: ProgressReportId) -> Result<ProgressReport, PipelineError> {
        self.reports.find_by_id(&id).await?.ok_or_else(|| {
            PipelineError::not_found(
                ErrorCode::ReportNotFound,
                format!("Progress report not found: {}", id),
            )
        })
    }
}
