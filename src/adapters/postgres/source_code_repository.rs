//! PostgreSQL implementation of SourceCodeRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::row_error;
use crate::domain::foundation::{DomainError, ProjectId, SourceCodeId, Timestamp};
use crate::domain::source_code::{Language, SourceCode};
use crate::ports::SourceCodeRepository;

#[derive(Clone)]
pub struct PostgresSourceCodeRepository {
    pool: PgPool,
}

impl PostgresSourceCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SourceCodeRepository for PostgresSourceCodeRepository {
    async fn save(&self, source_code: &SourceCode) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO source_codes (id, project_id, file_name, language, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(source_code.id.as_uuid())
        .bind(source_code.project_id.as_uuid())
        .bind(&source_code.file_name)
        .bind(source_code.language.display_name())
        .bind(&source_code.content)
        .bind(source_code.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert source code", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SourceCodeId) -> Result<Option<SourceCode>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, file_name, language, content, created_at
            FROM source_codes WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch source code", e))?;

        row.map(row_to_source_code).transpose()
    }

    async fn find_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<SourceCode>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, project_id, file_name, language, content, created_at
            FROM source_codes WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch project source codes", e))?;

        rows.into_iter().map(row_to_source_code).collect()
    }
}

fn row_to_source_code(row: PgRow) -> Result<SourceCode, DomainError> {
    let language: String = row.try_get("language").map_err(row_error)?;

    Ok(SourceCode {
        id: SourceCodeId::from_uuid(row.try_get("id").map_err(row_error)?),
        project_id: ProjectId::from_uuid(row.try_get("project_id").map_err(row_error)?),
        file_name: row.try_get("file_name").map_err(row_error)?,
        language: Language::from_name(&language),
        content: row.try_get("content").map_err(row_error)?,
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(row_error)?),
    })
}
