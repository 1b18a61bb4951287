use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, Percentage, ProjectId, QualityCheckId, Timestamp};

/// Points deducted from a quality score per reported issue.
pub const POINTS_PER_ISSUE: usize = 10;

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "minor" => Ok(Severity::Low),
            "medium" | "moderate" | "mid" => Ok(Severity::Medium),
            "high" | "major" | "critical" => Ok(Severity::High),
            other => Err(DomainError::validation(
                "severity",
                format!("Unknown severity: {}", other),
            )),
        }
    }
}

// Model replies use free-form severities; anything unrecognised is medium.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
}

impl Issue {
    pub fn new(kind: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            severity,
        }
    }
}

/// A proposed fix for an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub issue: String,
    pub suggestion: String,
}

impl Suggestion {
    pub fn new(issue: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// The JSON result stored on a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CheckResult {
    pub score: Percentage,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// `max(100 - 10 * issues, 0)`.
pub fn quality_score(total_issues: usize) -> Percentage {
    let deduction = total_issues.saturating_mul(POINTS_PER_ISSUE);
    Percentage::clamped(100 - deduction.min(100) as i64)
}

/// Which pipeline produced a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Quality,
    Consistency,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Quality => "quality",
            CheckKind::Consistency => "consistency",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quality" => Ok(CheckKind::Quality),
            "consistency" => Ok(CheckKind::Consistency),
            other => Err(DomainError::validation(
                "kind",
                format!("Unknown check kind: {}", other),
            )),
        }
    }
}

/// Quality or consistency check record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCheck {
    id: QualityCheckId,
    project_id: ProjectId,
    kind: CheckKind,
    result: CheckResult,
    created_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl QualityCheck {
    /// Creates a pending check with an empty result.
    pub fn new(project_id: ProjectId, kind: CheckKind) -> Self {
        Self {
            id: QualityCheckId::new(),
            project_id,
            kind,
            result: CheckResult::default(),
            created_at: Timestamp::now(),
            completed_at: None,
        }
    }

    /// Reconstitute a check from persistence (no validation).
    pub fn reconstitute(
        id: QualityCheckId,
        project_id: ProjectId,
        kind: CheckKind,
        result: CheckResult,
        created_at: Timestamp,
        completed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            project_id,
            kind,
            result,
            created_at,
            completed_at,
        }
    }

    pub fn id(&self) -> &QualityCheckId {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn kind(&self) -> CheckKind {
        self.kind
    }

    pub fn result(&self) -> &CheckResult {
        &self.result
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Stores the final result and stamps completion.
    pub fn complete(&mut self, result: CheckResult) {
        self.result = result;
        self.completed_at = Some(Timestamp::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn score_deducts_ten_per_issue() {
        assert_eq!(quality_score(0).value(), 100);
        assert_eq!(quality_score(4).value(), 60);
        assert_eq!(quality_score(10).value(), 0);
        assert_eq!(quality_score(25).value(), 0);
    }

    proptest! {
        #[test]
        fn score_never_leaves_range(n in 0usize..10_000) {
            let score = quality_score(n).value();
            prop_assert!(score <= 100);
            prop_assert_eq!(score as usize, 100usize.saturating_sub(n * 10));
        }
    }

    #[test]
    fn severity_is_lenient() {
        let issue: Issue =
            serde_json::from_str(r#"{"type":"x","description":"d","severity":"HIGH"}"#).unwrap();
        assert_eq!(issue.severity, Severity::High);

        let issue: Issue =
            serde_json::from_str(r#"{"type":"x","description":"d","severity":"urgent"}"#).unwrap();
        assert_eq!(issue.severity, Severity::Medium);
    }

    #[test]
    fn issue_kind_serializes_as_type() {
        let json = serde_json::to_value(Issue::new("syntax", "bad", Severity::Low)).unwrap();
        assert_eq!(json["type"], "syntax");
        assert_eq!(json["severity"], "low");
    }

    #[test]
    fn check_completes_once_result_is_set() {
        let mut check = QualityCheck::new(ProjectId::new(), CheckKind::Consistency);
        assert!(!check.is_complete());
        assert_eq!(check.result().score, Percentage::ZERO);

        check.complete(CheckResult {
            score: Percentage::new(75),
            issues: vec![],
            suggestions: vec![],
        });
        assert!(check.is_complete());
        assert_eq!(check.result().score.value(), 75);
    }
}
