//! GetCheckHandler - reads a quality or consistency check.

use std::sync::Arc;

use crate::application::PipelineError;
use crate::domain::foundation::{ErrorCode, QualityCheckId};
use crate::domain::quality::QualityCheck;
use crate::ports::QualityCheckRepository;

pub struct GetCheckHandler {
    checks: Arc<dyn QualityCheckRepository>,
}

impl GetCheckHandler {
    pub fn new(checks: Arc<dyn QualityCheckRepository>) -> Self {
        Self { checks }
    }

    pub async fn handle(&self, id: QualityCheckId) -> Result<QualityCheck, PipelineError> {
        self.checks.find_by_id(&id).await?.ok_or_else(|| {
            PipelineError::not_found(ErrorCode::CheckNotFound, format!("Check not found: {}", id))
        })
    }
}
