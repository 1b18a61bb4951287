//! HTTP adapter for quality and consistency checks.

mod dto;
mod handlers;
mod routes;

pub use dto::{CheckAcceptedResponse, CheckResponse, ConsistencyCheckRequest};
pub use handlers::CheckHandlers;
pub use routes::check_routes;
