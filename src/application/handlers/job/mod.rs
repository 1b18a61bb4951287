//! Job status handlers.

mod get_job;

pub use get_job::GetJobHandler;
