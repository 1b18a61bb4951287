//! HTTP adapter for proposals.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateProposalRequest, ProposalResponse};
pub use handlers::ProposalHandlers;
pub use routes::proposal_routes;
