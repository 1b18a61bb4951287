//! Project module - projects, templates and activity logs.

mod activity;
mod project;
mod template;

pub use activity::{ActivityLog, ActivityStatus};
pub use project::{Project, MAX_NAME_LENGTH};
pub use template::Template;
