//! Size and complexity metrics fed to the estimation prompts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::document::Document;
use crate::domain::source_code::SourceCode;

/// Average used when no other project has an estimate yet.
pub const DEFAULT_HISTORICAL_HOURS: f64 = 100.0;

/// How many past estimates feed the historical average.
pub const HISTORY_SAMPLE_SIZE: usize = 5;

static COMPLEXITY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"function|const|let|var").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    pub document_count: usize,
    pub document_complexity: usize,
    pub total_lines: usize,
    pub code_complexity: usize,
    pub historical_average_hours: f64,
}

impl ProjectMetrics {
    /// Computes metrics from a project's artifacts and the `total_hours`
    /// of estimates belonging to other projects.
    pub fn compute(
        documents: &[Document],
        source_codes: &[SourceCode],
        past_totals: &[f64],
    ) -> Self {
        let document_complexity: usize = documents.iter().map(|d| d.content().complexity()).sum();
        let total_lines: usize = source_codes
            .iter()
            .map(|c| c.content.split('\n').count())
            .sum();
        let code_complexity: usize = source_codes
            .iter()
            .map(|c| COMPLEXITY_TOKEN.find_iter(&c.content).count())
            .sum();

        let sample = &past_totals[..past_totals.len().min(HISTORY_SAMPLE_SIZE)];
        let historical_average_hours = if sample.is_empty() {
            DEFAULT_HISTORICAL_HOURS
        } else {
            sample.iter().sum::<f64>() / sample.len() as f64
        };

        Self {
            document_count: documents.len(),
            document_complexity,
            total_lines,
            code_complexity,
            historical_average_hours,
        }
    }
}
