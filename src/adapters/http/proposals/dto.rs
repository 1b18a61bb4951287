//! HTTP DTOs for proposal endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::proposal::Proposal;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProposalRequest {
    pub template_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProposalResponse {
    pub id: String,
    pub project_id: String,
    pub template_id: String,
    pub content: String,
    pub file_url: String,
    pub created_at: String,
}

impl From<Proposal> for ProposalResponse {
    fn from(proposal: Proposal) -> Self {
        Self {
            id: proposal.id.to_string(),
            project_id: proposal.project_id.to_string(),
            template_id: proposal.template_id.to_string(),
            content: proposal.content,
            file_url: proposal.file_url,
            created_at: proposal.created_at.to_rfc3339(),
        }
    }
}
