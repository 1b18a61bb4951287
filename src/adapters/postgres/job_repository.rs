//! PostgreSQL implementation of JobRepository.
//!
//! Every checkpoint a pipeline reaches is an `update` here, which is what
//! polling clients read back.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::row_error;
use crate::domain::foundation::{DomainError, ErrorCode, JobId, Percentage, ProjectId, Timestamp};
use crate::domain::job::{GenerationJob, JobKind, JobStatus};
use crate::ports::JobRepository;

#[derive(Clone)]
pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn save(&self, job: &GenerationJob) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO generation_jobs (
                id, kind, project_id, status, progress, target_id, fallback, message,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(job.id().as_uuid())
        .bind(job.kind().as_str())
        .bind(job.project_id().map(|p| *p.as_uuid()))
        .bind(job.status().as_str())
        .bind(job.progress().value() as i16)
        .bind(job.target_id())
        .bind(job.fallback())
        .bind(job.message())
        .bind(job.created_at().as_datetime())
        .bind(job.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert job", e))?;

        Ok(())
    }

    async fn update(&self, job: &GenerationJob) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE generation_jobs SET
                status = $2,
                progress = $3,
                target_id = $4,
                fallback = $5,
                message = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(job.id().as_uuid())
        .bind(job.status().as_str())
        .bind(job.progress().value() as i16)
        .bind(job.target_id())
        .bind(job.fallback())
        .bind(job.message())
        .bind(job.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update job", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::JobNotFound,
                format!("Job not found: {}", job.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<GenerationJob>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, kind, project_id, status, progress, target_id, fallback, message,
                   created_at, updated_at
            FROM generation_jobs WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch job", e))?;

        row.map(row_to_job).transpose()
    }
}

fn row_to_job(row: PgRow) -> Result<GenerationJob, DomainError> {
    let kind: String = row.try_get("kind").map_err(row_error)?;
    let status: String = row.try_get("status").map_err(row_error)?;
    let project_id: Option<Uuid> = row.try_get("project_id").map_err(row_error)?;
    let progress: i16 = row.try_get("progress").map_err(row_error)?;

    Ok(GenerationJob::reconstitute(
        JobId::from_uuid(row.try_get("id").map_err(row_error)?),
        kind.parse::<JobKind>()?,
        project_id.map(ProjectId::from_uuid),
        status.parse::<JobStatus>()?,
        Percentage::clamped(progress as i64),
        row.try_get("target_id").map_err(row_error)?,
        row.try_get("fallback").map_err(row_error)?,
        row.try_get("message").map_err(row_error)?,
        Timestamp::from_datetime(row.try_get("created_at").map_err(row_error)?),
        Timestamp::from_datetime(row.try_get("updated_at").map_err(row_error)?),
    ))
}
