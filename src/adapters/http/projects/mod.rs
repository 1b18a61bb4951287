//! HTTP adapter for projects, templates and activity logs.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ActivityLogResponse, CreateProjectRequest, ProjectResponse, RecordActivityRequest,
    TemplateResponse,
};
pub use handlers::ProjectHandlers;
pub use routes::project_routes;
