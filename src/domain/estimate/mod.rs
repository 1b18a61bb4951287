//! Estimate module - per-phase effort estimates.

mod metrics;
mod work_estimate;

pub use metrics::{ProjectMetrics, DEFAULT_HISTORICAL_HOURS, HISTORY_SAMPLE_SIZE};
pub use work_estimate::{
    parse_hours, Estimate, Phase, PhaseEstimate, WorkEstimate, FALLBACK_PHASE_HOURS,
};
