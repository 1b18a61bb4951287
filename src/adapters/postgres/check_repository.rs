//! PostgreSQL implementation of QualityCheckRepository.
//!
//! Quality and consistency checks share one table, told apart by `kind`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use super::row_error;
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, QualityCheckId, Timestamp};
use crate::domain::quality::{CheckKind, CheckResult, QualityCheck};
use crate::ports::QualityCheckRepository;

#[derive(Clone)]
pub struct PostgresQualityCheckRepository {
    pool: PgPool,
}

impl PostgresQualityCheckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QualityCheckRepository for PostgresQualityCheckRepository {
    async fn save(&self, check: &QualityCheck) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO quality_checks (id, project_id, kind, result, created_at, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(check.id().as_uuid())
        .bind(check.project_id().as_uuid())
        .bind(check.kind().as_str())
        .bind(Json(check.result()))
        .bind(check.created_at().as_datetime())
        .bind(check.completed_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert check", e))?;

        Ok(())
    }

    async fn update(&self, check: &QualityCheck) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE quality_checks SET result = $2, completed_at = $3 WHERE id = $1",
        )
        .bind(check.id().as_uuid())
        .bind(Json(check.result()))
        .bind(check.completed_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update check", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CheckNotFound,
                format!("Check not found: {}", check.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &QualityCheckId) -> Result<Option<QualityCheck>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, kind, result, created_at, completed_at
            FROM quality_checks WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch check", e))?;

        row.map(row_to_check).transpose()
    }
}

fn row_to_check(row: PgRow) -> Result<QualityCheck, DomainError> {
    let kind: String = row.try_get("kind").map_err(row_error)?;
    let Json(result): Json<CheckResult> = row.try_get("result").map_err(row_error)?;
    let completed_at: Option<DateTime<Utc>> = row.try_get("completed_at").map_err(row_error)?;

    Ok(QualityCheck::reconstitute(
        QualityCheckId::from_uuid(row.try_get("id").map_err(row_error)?),
        ProjectId::from_uuid(row.try_get("project_id").map_err(row_error)?),
        kind.parse::<CheckKind>()?,
        result,
        Timestamp::from_datetime(row.try_get("created_at").map_err(row_error)?),
        completed_at.map(Timestamp::from_datetime),
    ))
}
