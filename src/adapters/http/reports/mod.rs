//! HTTP adapter for progress reports.

mod dto;
mod handlers;
mod routes;

pub use dto::{ProgressReportRequest, ProgressReportResponse, StoredReportResponse};
pub use handlers::ReportHandlers;
pub use routes::report_routes;
