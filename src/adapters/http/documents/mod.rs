//! HTTP adapter for document endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{DocumentResponse, RegisterDocumentRequest};
pub use handlers::DocumentHandlers;
pub use routes::document_routes;
