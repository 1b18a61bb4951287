//! Report module - activity-log based progress reports.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::domain::foundation::{Percentage, ProgressReportId, ProjectId, Timestamp};
use crate::domain::project::{ActivityLog, ActivityStatus};

/// Progress of one phase within the report period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseProgress {
    pub name: String,
    pub progress: Percentage,
    /// Status of the first log seen for the phase.
    pub status: ActivityStatus,
}

/// A delayed or problem log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportIssue {
    pub phase: String,
    pub description: String,
    pub timestamp: Timestamp,
}

/// Figures computed from the activity logs of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProgressSnapshot {
    pub overall_progress: Percentage,
    pub phases: Vec<PhaseProgress>,
    pub issues: Vec<ReportIssue>,
}

impl ProgressSnapshot {
    /// Groups logs by phase in first-appearance order.
    pub fn from_logs(logs: &[ActivityLog]) -> Self {
        struct Tally<'a> {
            name: &'a str,
            status: ActivityStatus,
            completed: usize,
            total: usize,
        }

        let mut tallies: Vec<Tally<'_>> = Vec::new();
        for log in logs {
            let idx = match tallies.iter().position(|t| t.name == log.phase) {
                Some(idx) => idx,
                None => {
                    tallies.push(Tally {
                        name: &log.phase,
                        status: log.status,
                        completed: 0,
                        total: 0,
                    });
                    tallies.len() - 1
                }
            };
            let tally = &mut tallies[idx];
            tally.total += 1;
            if log.status == ActivityStatus::Completed {
                tally.completed += 1;
            }
        }

        let phases: Vec<PhaseProgress> = tallies
            .iter()
            .map(|t| PhaseProgress {
                name: t.name.to_string(),
                progress: Percentage::ratio(t.completed, t.total),
                status: t.status,
            })
            .collect();

        let finished = phases.iter().filter(|p| p.progress.is_complete()).count();
        let overall_progress = Percentage::ratio(finished, phases.len());

        let issues = logs
            .iter()
            .filter(|log| log.status.is_issue())
            .map(|log| ReportIssue {
                phase: log.phase.clone(),
                description: log.description.clone(),
                timestamp: log.timestamp,
            })
            .collect();

        Self {
            overall_progress,
            phases,
            issues,
        }
    }

    /// Plain-text summary used when no narrative can be generated.
    pub fn fallback_narrative(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Overall progress: {}", self.overall_progress);
        out.push_str("\nProgress by phase:\n");
        for phase in &self.phases {
            let _ = writeln!(out, "- {}: {}", phase.name, phase.progress);
        }
        out.push_str("\nKey issues and delays:\n");
        if self.issues.is_empty() {
            out.push_str("None\n");
        } else {
            for issue in &self.issues {
                let _ = writeln!(out, "- [{}] {}", issue.phase, issue.description);
            }
        }
        out
    }
}

/// Stored progress report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub id: ProgressReportId,
    pub project_id: ProjectId,
    pub period_start: Timestamp,
    pub period_end: Timestamp,
    pub snapshot: ProgressSnapshot,
    pub summary: String,
    pub created_at: Timestamp,
}

impl ProgressReport {
    pub fn new(
        project_id: ProjectId,
        period_start: Timestamp,
        period_end: Timestamp,
        snapshot: ProgressSnapshot,
        summary: String,
    ) -> Self {
        Self {
            id: ProgressReportId::new(),
            project_id,
            period_start,
            period_end,
            snapshot,
            summary,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(project: ProjectId, phase: &str, status: ActivityStatus, desc: &str) -> ActivityLog {
        ActivityLog::new(project, phase, status, Timestamp::now(), desc).unwrap()
    }

    #[test]
    fn empty_logs_give_zero() {
        let snapshot = ProgressSnapshot::from_logs(&[]);
        assert_eq!(snapshot.overall_progress, Percentage::ZERO);
        assert!(snapshot.phases.is_empty());
        assert!(snapshot.issues.is_empty());
    }

    #[test]
    fn phases_keep_first_appearance_order_and_status() {
        let p = ProjectId::new();
        let logs = vec![
            log(p, "design", ActivityStatus::InProgress, "started"),
            log(p, "design", ActivityStatus::Completed, "done"),
            log(p, "design", ActivityStatus::Completed, "done"),
            log(p, "build", ActivityStatus::Completed, "done"),
            log(p, "test", ActivityStatus::Delayed, "env missing"),
        ];
        let snapshot = ProgressSnapshot::from_logs(&logs);

        let names: Vec<_> = snapshot.phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["design", "build", "test"]);
        assert_eq!(snapshot.phases[0].progress.value(), 67);
        assert_eq!(snapshot.phases[0].status, ActivityStatus::InProgress);
        assert_eq!(snapshot.phases[1].progress.value(), 100);
        assert_eq!(snapshot.phases[2].progress.value(), 0);
        // One of three phases finished.
        assert_eq!(snapshot.overall_progress.value(), 33);
    }

    #[test]
    fn delayed_and_problem_logs_become_issues() {
        let p = ProjectId::new();
        let logs = vec![
            log(p, "dev", ActivityStatus::Problem, "flaky CI"),
            log(p, "dev", ActivityStatus::Completed, "merged"),
            log(p, "qa", ActivityStatus::Delayed, "waiting on env"),
        ];
        let snapshot = ProgressSnapshot::from_logs(&logs);
        assert_eq!(snapshot.issues.len(), 2);
        assert_eq!(snapshot.issues[0].description, "flaky CI");
        assert_eq!(snapshot.issues[1].phase, "qa");
    }

    #[test]
    fn fallback_narrative_lists_phases_and_issues() {
        let p = ProjectId::new();
        let logs = vec![
            log(p, "dev", ActivityStatus::Completed, "merged"),
            log(p, "qa", ActivityStatus::Delayed, "waiting on env"),
        ];
        let text = ProgressSnapshot::from_logs(&logs).fallback_narrative();
        assert!(text.contains("Overall progress: 50%"));
        assert!(text.contains("- dev: 100%"));
        assert!(text.contains("- [qa] waiting on env"));
    }

    #[test]
    fn fallback_narrative_says_none_without_issues() {
        let p = ProjectId::new();
        let logs = vec![log(p, "dev", ActivityStatus::Completed, "merged")];
        let text = ProgressSnapshot::from_logs(&logs).fallback_narrative();
        assert!(text.contains("None"));
    }
}
