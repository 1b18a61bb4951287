//! Work estimate handlers.

mod latest_estimate;
mod run_work_estimate;

pub use latest_estimate::GetLatestEstimateHandler;
pub use run_work_estimate::{RunWorkEstimateCommand, RunWorkEstimateHandler};
