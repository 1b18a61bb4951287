//! PostgreSQL implementation of DocumentRepository.
//!
//! Document metadata lives in columns; title, sections and progress are one
//! JSONB `content` value. The uploaded body itself lives in object storage.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{parse_user_id, row_error};
use crate::domain::document::{DocType, Document, DocumentContent};
use crate::domain::foundation::{DocumentId, DomainError, ErrorCode, ProjectId, Timestamp};
use crate::ports::DocumentRepository;

const SELECT_COLUMNS: &str =
    "SELECT id, project_id, created_by, doc_type, content, created_at, updated_at FROM documents";

#[derive(Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresDocumentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresDocumentRepository")
            .field("pool", &"PgPool")
            .finish()
    }
}

impl PostgresDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO documents (
                id, project_id, created_by, doc_type, content, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(document.project_id().as_uuid())
        .bind(document.created_by().as_str())
        .bind(document.doc_type().as_str())
        .bind(Json(document.content()))
        .bind(document.created_at().as_datetime())
        .bind(document.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert document", e))?;

        Ok(())
    }

    async fn update(&self, document: &Document) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE documents SET
                content = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(Json(document.content()))
        .bind(document.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update document", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DocumentNotFound,
                format!("Document not found: {}", document.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch document", e))?;

        row.map(row_to_document).transpose()
    }

    async fn find_many(&self, ids: &[DocumentId]) -> Result<Vec<Document>, DomainError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(&format!("{} WHERE id = ANY($1)", SELECT_COLUMNS))
            .bind(&uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch documents", e))?;

        let mut documents = rows
            .into_iter()
            .map(row_to_document)
            .collect::<Result<Vec<_>, _>>()?;

        // Preserve the caller's ordering.
        documents.sort_by_key(|d| ids.iter().position(|id| id == d.id()));
        Ok(documents)
    }

    async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<Document>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE project_id = $1 ORDER BY created_at ASC",
            SELECT_COLUMNS
        ))
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch project documents", e))?;

        rows.into_iter().map(row_to_document).collect()
    }
}

fn row_to_document(row: PgRow) -> Result<Document, DomainError> {
    let created_by: String = row.try_get("created_by").map_err(row_error)?;
    let doc_type: String = row.try_get("doc_type").map_err(row_error)?;
    let Json(content): Json<DocumentContent> = row.try_get("content").map_err(row_error)?;

    Ok(Document::reconstitute(
        DocumentId::from_uuid(row.try_get("id").map_err(row_error)?),
        ProjectId::from_uuid(row.try_get("project_id").map_err(row_error)?),
        parse_user_id(&created_by)?,
        doc_type.parse::<DocType>()?,
        content,
        Timestamp::from_datetime(row.try_get("created_at").map_err(row_error)?),
        Timestamp::from_datetime(row.try_get("updated_at").map_err(row_error)?),
    ))
}
