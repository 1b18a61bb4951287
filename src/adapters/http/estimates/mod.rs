//! HTTP adapter for work estimates.

mod dto;
mod handlers;
mod routes;

pub use dto::WorkEstimateResponse;
pub use handlers::EstimateHandlers;
pub use routes::estimate_routes;
