//! Progress report handlers.

mod get_progress_report;
mod run_progress_report;

pub use get_progress_report::GetProgressReportHandler;
pub use run_progress_report::{
    ProgressReportOutcome, RunProgressReportCommand, RunProgressReportHandler,
    NO_ACTIVITY_MESSAGE,
};
