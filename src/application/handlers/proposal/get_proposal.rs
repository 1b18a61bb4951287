//! GetProposalHandler - reads a stored proposal.

use std::sync::Arc;

use crate::application::PipelineError;
use crate::domain::foundation::{ErrorCode, ProposalId};
use crate::domain::proposal::Proposal;
use crate::ports::ProposalRepository;

pub struct GetProposalHandler {
    proposals: Arc<dyn ProposalRepository>,
}

impl GetProposalHandler {
    pub fn new(proposals: Arc<dyn ProposalRepository>) -> Self {
        Self { proposals }
    }

    pub async fn handle(&self, id: ProposalId) -> Result<Proposal, PipelineError> {
        self.proposals.find_by_id(&id).await?.ok_or_else(|| {
            PipelineError::not_found(
                ErrorCode::ProposalNotFound,
                format!("Proposal not found: {}", id),
            )
        })
    }
}
