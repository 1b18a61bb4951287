//! Proposal handlers.

mod create_proposal;
mod get_proposal;

pub use create_proposal::{CreateProposalCommand, CreateProposalHandler};
pub use get_proposal::GetProposalHandler;
