//! PostgreSQL implementation of ProgressReportRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use super::row_error;
use crate::domain::foundation::{DomainError, ProgressReportId, ProjectId, Timestamp};
use crate::domain::report::{ProgressReport, ProgressSnapshot};
use crate::ports::ProgressReportRepository;

#[derive(Clone)]
pub struct PostgresProgressReportRepository {
    pool: PgPool,
}

impl PostgresProgressReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressReportRepository for PostgresProgressReportRepository {
    async fn save(&self, report: &ProgressReport) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO progress_reports (
                id, project_id, period_start, period_end, snapshot, summary, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(report.id.as_uuid())
        .bind(report.project_id.as_uuid())
        .bind(report.period_start.as_datetime())
        .bind(report.period_end.as_datetime())
        .bind(Json(&report.snapshot))
        .bind(&report.summary)
        .bind(report.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert progress report", e))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ProgressReportId,
    ) -> Result<Option<ProgressReport>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, period_start, period_end, snapshot, summary, created_at
            FROM progress_reports WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch progress report", e))?;

        row.map(row_to_report).transpose()
    }
}

fn row_to_report(row: PgRow) -> Result<ProgressReport, DomainError> {
    let Json(snapshot): Json<ProgressSnapshot> = row.try_get("snapshot").map_err(row_error)?;

    Ok(ProgressReport {
        id: ProgressReportId::from_uuid(row.try_get("id").map_err(row_error)?),
        project_id: ProjectId::from_uuid(row.try_get("project_id").map_err(row_error)?),
        period_start: Timestamp::from_datetime(row.try_get("period_start").map_err(row_error)?),
        period_end: Timestamp::from_datetime(row.try_get("period_end").map_err(row_error)?),
        snapshot,
        summary: row.try_get("summary").map_err(row_error)?,
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(row_error)?),
    })
}
