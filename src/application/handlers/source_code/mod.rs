//! Source code command and query handlers.

mod generate_source_code;
mod source_code_queries;

pub use generate_source_code::{GenerateSourceCodeCommand, GenerateSourceCodeHandler};
pub use source_code_queries::{GetSourceCodeHandler, ListSourceCodesHandler};
