//! RunProgressReportHandler - summarizes a project's activity logs for a period.

use std::sync::Arc;

use crate::application::handlers::project::require_project;
use crate::application::{encode_json, ContentGenerator, PipelineError};
use crate::domain::foundation::{ProgressReportId, ProjectId, Timestamp};
use crate::domain::report::{ProgressReport, ProgressSnapshot};
use crate::ports::{ProgressReportRepository, ProjectRepository};

const SYSTEM_PROMPT: &str = "You are a project manager. Write a concise progress report from the \
phase progress and issues provided. Cover overall progress, progress by phase and key issues or delays.";

/// Message returned when the period has no activity.
pub const NO_ACTIVITY_MESSAGE: &str = "No activity logs found for the selected period.";

#[derive(Debug, Clone)]
pub struct RunProgressReportCommand {
    pub project_id: ProjectId,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Figures and narrative of a report run.
///
/// `report_id` is `None` and `url` empty when there was nothing to report.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReportOutcome {
    pub report_id: Option<ProgressReportId>,
    pub snapshot: ProgressSnapshot,
    pub summary: String,
    pub url: String,
    pub fallback: bool,
}

pub struct RunProgressReportHandler {
    projects: Arc<dyn ProjectRepository>,
    reports: Arc<dyn ProgressReportRepository>,
    generator: ContentGenerator,
    public_base_url: String,
}

impl RunProgressReportHandler {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        reports: Arc<dyn ProgressReportRepository>,
        generator: ContentGenerator,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            projects,
            reports,
            generator,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// # Errors
    ///
    /// - `InvalidInput` if `end` is before `start`
    /// - `NotFound` if the project doesn't exist
    pub async fn handle(
        &self,
        cmd: RunProgressReportCommand,
    ) -> Result<ProgressReportOutcome, PipelineError> {
        if cmd.end.is_before(&cmd.start) {
            return Err(PipelineError::invalid_input(
                "The end date must not be before the start date",
            ));
        }
        require_project(self.projects.as_ref(), &cmd.project_id).await?;

        let logs = self
            .projects
            .activity_between(&cmd.project_id, &cmd.start, &cmd.end)
            .await?;
        if logs.is_empty() {
            return Ok(ProgressReportOutcome {
                report_id: None,
                snapshot: ProgressSnapshot::default(),
                summary: NO_ACTIVITY_MESSAGE.to_string(),
                url: String::new(),
                fallback: false,
            });
        }

        let snapshot = ProgressSnapshot::from_logs(&logs);
        let user_prompt = format!(
            "Project ID: {}\nPeriod: {} to {}\nProgress by phase: {}\nIssues: {}",
            cmd.project_id,
            cmd.start.to_rfc3339(),
            cmd.end.to_rfc3339(),
            encode_json(&snapshot.phases)?,
            encode_json(&snapshot.issues)?,
        );

        let (summary, fallback) = match self
            .generator
            .generate("report.narrative", Some(cmd.project_id), SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(summary) => (summary, false),
            Err(err) => {
                tracing::warn!(project_id = %cmd.project_id, error = %err, "using generated report summary");
                (snapshot.fallback_narrative(), true)
            }
        };

        let report = ProgressReport::new(cmd.project_id, cmd.start, cmd.end, snapshot, summary);
        self.reports.save(&report).await?;

        let url = format!("{}/progress-reports/{}", self.public_base_url, report.id);
        tracing::info!(report_id = %report.id, logs = logs.len(), "progress report saved");

        Ok(ProgressReportOutcome {
            report_id: Some(report.id),
            snapshot: report.snapshot,
            summary: report.summary,
            url,
            fallback,
        })
    }
}
