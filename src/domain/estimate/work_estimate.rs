//! Work estimate record and hour parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ProjectId, Timestamp, WorkEstimateId};

/// Hours used for a phase whose model reply is unusable.
pub const FALLBACK_PHASE_HOURS: f64 = 50.0;

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid regex"));

/// Project phases estimated one at a time, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Requirements,
    Design,
    Development,
    Testing,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Requirements,
        Phase::Design,
        Phase::Development,
        Phase::Testing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Requirements => "requirements definition",
            Phase::Design => "design",
            Phase::Development => "development",
            Phase::Testing => "testing",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseEstimate {
    pub phase: Phase,
    pub hours: f64,
    /// True when `hours` is the fallback value rather than a model answer.
    #[serde(default)]
    pub fallback: bool,
}

/// The JSON body stored on a work estimate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub total_hours: f64,
    pub breakdown: Vec<PhaseEstimate>,
}

impl Estimate {
    pub fn from_breakdown(breakdown: Vec<PhaseEstimate>) -> Self {
        let total_hours: f64 = breakdown.iter().map(|p| p.hours).sum();
        Self {
            total_hours,
            breakdown,
        }
    }

    pub fn used_fallback(&self) -> bool {
        self.breakdown.iter().any(|p| p.fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEstimate {
    pub id: WorkEstimateId,
    pub project_id: ProjectId,
    pub estimate: Estimate,
    pub created_at: Timestamp,
}

impl WorkEstimate {
    pub fn new(project_id: ProjectId, estimate: Estimate) -> Self {
        Self {
            id: WorkEstimateId::new(),
            project_id,
            estimate,
            created_at: Timestamp::now(),
        }
    }
}

/// Reads the number at the start of a model reply.
///
/// Returns `None` when the reply does not start with a number or the number
/// is negative or not finite.
pub fn parse_hours(reply: &str) -> Option<f64> {
    let captures = LEADING_NUMBER.captures(reply)?;
    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_leading_numbers() {
        assert_eq!(parse_hours("120"), Some(120.0));
        assert_eq!(parse_hours("  42.5 hours"), Some(42.5));
        assert_eq!(parse_hours("8h"), Some(8.0));
        assert_eq!(parse_hours(".5"), Some(0.5));
    }

    #[test]
    fn rejects_non_numeric_and_negative() {
        assert_eq!(parse_hours("About 40 hours"), None);
        assert_eq!(parse_hours(""), None);
        assert_eq!(parse_hours("-10"), None);
    }

    proptest! {
        #[test]
        fn any_non_negative_integer_roundtrips(n in 0u32..1_000_000) {
            let reply = format!("{} hours", n);
            prop_assert_eq!(parse_hours(&reply), Some(n as f64));
        }

        #[test]
        fn never_returns_negative(s in ".*") {
            if let Some(hours) = parse_hours(&s) {
                prop_assert!(hours >= 0.0);
            }
        }
    }

    #[test]
    fn total_is_sum_of_breakdown() {
        let estimate = Estimate::from_breakdown(vec![
            PhaseEstimate { phase: Phase::Requirements, hours: 10.0, fallback: false },
            PhaseEstimate { phase: Phase::Design, hours: 50.0, fallback: true },
            PhaseEstimate { phase: Phase::Development, hours: 30.5, fallback: false },
            PhaseEstimate { phase: Phase::Testing, hours: 9.5, fallback: false },
        ]);
        assert_eq!(estimate.total_hours, 100.0);
        assert!(estimate.used_fallback());
    }
}
