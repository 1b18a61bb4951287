//! Document command and query handlers.

mod document_queries;
mod generate_document;
mod register_document;

pub use document_queries::{GetDocumentHandler, ListDocumentsHandler};
pub use generate_document::{parse_sections, GenerateDocumentCommand, GenerateDocumentHandler};
pub use register_document::{RegisterDocumentCommand, RegisterDocumentHandler};
