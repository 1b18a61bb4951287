//! PostgreSQL implementation of WorkEstimateRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use super::row_error;
use crate::domain::estimate::{Estimate, PhaseEstimate, WorkEstimate};
use crate::domain::foundation::{DomainError, ProjectId, Timestamp, WorkEstimateId};
use crate::ports::WorkEstimateRepository;

#[derive(Clone)]
pub struct PostgresWorkEstimateRepository {
    pool: PgPool,
}

impl PostgresWorkEstimateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkEstimateRepository for PostgresWorkEstimateRepository {
    async fn save(&self, estimate: &WorkEstimate) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO work_estimates (id, project_id, total_hours, breakdown, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(estimate.id.as_uuid())
        .bind(estimate.project_id.as_uuid())
        .bind(estimate.estimate.total_hours)
        .bind(Json(&estimate.estimate.breakdown))
        .bind(estimate.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert work estimate", e))?;

        Ok(())
    }

    async fn latest_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Option<WorkEstimate>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, total_hours, breakdown, created_at
            FROM work_estimates
            WHERE project_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch work estimate", e))?;

        row.map(row_to_estimate).transpose()
    }

    async fn recent_totals_excluding(
        &self,
        project_id: &ProjectId,
        limit: usize,
    ) -> Result<Vec<f64>, DomainError> {
        let totals: Vec<(f64,)> = sqlx::query_as(
            r#"
            SELECT total_hours FROM work_estimates
            WHERE project_id <> $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch historical estimates", e))?;

        Ok(totals.into_iter().map(|(hours,)| hours).collect())
    }
}

fn row_to_estimate(row: PgRow) -> Result<WorkEstimate, DomainError> {
    let Json(breakdown): Json<Vec<PhaseEstimate>> = row.try_get("breakdown").map_err(row_error)?;

    Ok(WorkEstimate {
        id: WorkEstimateId::from_uuid(row.try_get("id").map_err(row_error)?),
        project_id: ProjectId::from_uuid(row.try_get("project_id").map_err(row_error)?),
        estimate: Estimate {
            total_hours: row.try_get("total_hours").map_err(row_error)?,
            breakdown,
        },
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(row_error)?),
    })
}
