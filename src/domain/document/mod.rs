//! Document module - uploaded sources and their generated sections.

mod aggregate;

pub use aggregate::{DocType, Document, DocumentContent, Section};
