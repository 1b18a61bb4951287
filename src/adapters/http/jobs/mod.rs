//! HTTP adapter for background job polling.

mod dto;
mod handlers;
mod routes;

pub use dto::{JobAcceptedResponse, JobResponse};
pub use handlers::JobHandlers;
pub use routes::job_routes;
