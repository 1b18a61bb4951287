//! HTTP routes for proposal endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_proposal, get_proposal, ProposalHandlers};

pub fn proposal_routes(handlers: ProposalHandlers) -> Router {
    Router::new()
        .route("/projects/:id/proposals", post(create_proposal))
        .route("/proposals/:id", get(get_proposal))
        .with_state(handlers)
}
