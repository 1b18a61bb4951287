//! HTTP routes for document endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    generate_document, get_document, list_documents, register_document, DocumentHandlers,
};

pub fn document_routes(handlers: DocumentHandlers) -> Router {
    Router::new()
        .route(
            "/projects/:id/documents",
            get(list_documents).post(register_document),
        )
        .route("/documents/:id", get(get_document))
        .route("/documents/:id/generate", post(generate_document))
        .with_state(handlers)
}
