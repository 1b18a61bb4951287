//! Quality module - quality and consistency check records.
//!
//! Both check kinds share one record type. The pipelines fill `result`
//! and stamp `completed_at` when done.

mod check;
mod samples;

pub use check::{quality_score, CheckKind, CheckResult, Issue, QualityCheck, Severity, Suggestion};
pub use samples::{
    consistency_sample, sample_code_issues, sample_document_issues, sample_suggestions,
};
