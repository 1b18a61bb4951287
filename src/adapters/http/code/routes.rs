//! HTTP routes for source-code endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    generate_source_code, get_source_code, list_source_codes, SourceCodeHandlers,
};

pub fn source_code_routes(handlers: SourceCodeHandlers) -> Router {
    Router::new()
        .route("/documents/:id/source-code", post(generate_source_code))
        .route("/projects/:id/source-codes", get(list_source_codes))
        .route("/source-codes/:id", get(get_source_code))
        .with_state(handlers)
}
