//! HTTP DTOs for progress-report endpoints.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::http::error::ApiError;
use crate::application::handlers::report::ProgressReportOutcome;
use crate::domain::foundation::Timestamp;
use crate::domain::report::{PhaseProgress, ProgressReport, ReportIssue};

/// Reporting period. Each bound is an RFC 3339 instant or a `YYYY-MM-DD`
/// date; a bare end date covers that whole day.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressReportRequest {
    pub start_date: String,
    pub end_date: String,
}

impl ProgressReportRequest {
    pub fn period(&self) -> Result<(Timestamp, Timestamp), ApiError> {
        let start = parse_bound(&self.start_date, NaiveTime::MIN)?;
        let end = parse_bound(&self.end_date, end_of_day())?;
        Ok((start, end))
    }
}

/// Last representable instant of a day.
fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN)
}

fn parse_bound(raw: &str, time_of_day: NaiveTime) -> Result<Timestamp, ApiError> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Timestamp::from_datetime(instant.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| Timestamp::from_datetime(date.and_time(time_of_day).and_utc()))
        .map_err(|_| ApiError::bad_request(format!("Invalid date: {}", raw)))
}

/// Result of running a report.
///
/// `report_id` is absent and `url` empty when the period had no activity.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReportResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    pub overall_progress: u8,
    pub phases: Vec<PhaseProgress>,
    pub issues: Vec<ReportIssue>,
    pub summary: String,
    pub url: String,
    pub fallback: bool,
}

impl From<ProgressReportOutcome> for ProgressReportResponse {
    fn from(outcome: ProgressReportOutcome) -> Self {
        Self {
            report_id: outcome.report_id.map(|id| id.to_string()),
            overall_progress: outcome.snapshot.overall_progress.value(),
            phases: outcome.snapshot.phases,
            issues: outcome.snapshot.issues,
            summary: outcome.summary,
            url: outcome.url,
            fallback: outcome.fallback,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredReportResponse {
    pub id: String,
    pub project_id: String,
    pub period_start: String,
    pub period_end: String,
    pub overall_progress: u8,
    pub phases: Vec<PhaseProgress>,
    pub issues: Vec<ReportIssue>,
    pub summary: String,
    pub created_at: String,
}

impl From<ProgressReport> for StoredReportResponse {
    fn from(report: ProgressReport) -> Self {
        Self {
            id: report.id.to_string(),
            project_id: report.project_id.to_string(),
            period_start: report.period_start.to_rfc3339(),
            period_end: report.period_end.to_rfc3339(),
            overall_progress: report.snapshot.overall_progress.value(),
            phases: report.snapshot.phases,
            issues: report.snapshot.issues,
            summary: report.summary,
            created_at: report.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: &str, end: &str) -> ProgressReportRequest {
        ProgressReportRequest {
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[test]
    fn bare_dates_cover_whole_days() {
        let (start, end) = request("2026-03-01", "2026-03-01").period().unwrap();
        assert_eq!(start.to_rfc3339(), "2026-03-01T00:00:00+00:00");
        assert!(end.to_rfc3339().starts_with("2026-03-01T23:59:59.999"));
    }

    #[test]
    fn bare_end_date_includes_sub_millisecond_instants() {
        let (start, end) = request("2026-10-14", "2026-10-14").period().unwrap();
        let late = Timestamp::from_datetime(
            DateTime::parse_from_rfc3339("2026-10-14T23:59:59.9995Z")
                .unwrap()
                .with_timezone(&Utc),
        );
        assert!(!late.is_after(&end));
        assert!(!late.is_before(&start));

        let next_day = Timestamp::from_datetime(
            DateTime::parse_from_rfc3339("2026-10-15T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        );
        assert!(next_day.is_after(&end));
    }

    #[test]
    fn rfc3339_instants_are_kept() {
        let (start, _) = request("2026-03-01T12:30:00+02:00", "2026-03-02").period().unwrap();
        assert_eq!(start.to_rfc3339(), "2026-03-01T10:30:00+00:00");
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert!(request("yesterday", "2026-03-02").period().is_err());
    }
}
