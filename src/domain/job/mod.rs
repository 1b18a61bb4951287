//! Job module - background pipeline runs and their progress.

mod aggregate;
mod status;

pub use aggregate::{Checkpoint, GenerationJob};
pub use status::{JobKind, JobStatus};
