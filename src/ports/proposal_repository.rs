//! Proposal repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProposalId};
use crate::domain::proposal::Proposal;

#[async_trait]
pub trait ProposalRepository: Send + Sync {
    async fn save(&self, proposal: &Proposal) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError>;
}
