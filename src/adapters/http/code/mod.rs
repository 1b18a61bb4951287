//! HTTP adapter for source-code generation.

mod dto;
mod handlers;
mod routes;

pub use dto::{GenerateSourceCodeRequest, SourceCodeResponse};
pub use handlers::SourceCodeHandlers;
pub use routes::source_code_routes;
