//! Canned results used when a model call fails or returns unusable output.

use super::{CheckResult, Issue, Severity, Suggestion};
use crate::domain::foundation::Percentage;

pub fn sample_document_issues() -> Vec<Issue> {
    vec![
        Issue::new("document", "Sample issue 1", Severity::Low),
        Issue::new("document", "Sample issue 2", Severity::Medium),
    ]
}

pub fn sample_code_issues() -> Vec<Issue> {
    vec![
        Issue::new("syntax_error", "Sample error 1", Severity::High),
        Issue::new("best_practice", "Sample violation 1", Severity::Medium),
    ]
}

pub fn sample_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion::new("Sample issue 1", "Sample suggestion 1"),
        Suggestion::new("Sample issue 2", "Sample suggestion 2"),
    ]
}

/// Result stored when any consistency stage fails.
pub fn consistency_sample() -> CheckResult {
    CheckResult {
        score: Percentage::new(80),
        issues: vec![
            Issue::new(
                "keyword_mismatch",
                "Keywords used in document A and document B do not match.",
                Severity::Medium,
            ),
            Issue::new(
                "traceability_gap",
                "Traceability between the requirements and design documents is insufficient.",
                Severity::High,
            ),
        ],
        suggestions: Vec::new(),
    }
}
