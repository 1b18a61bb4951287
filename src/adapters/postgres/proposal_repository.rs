//! PostgreSQL implementation of ProposalRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::row_error;
use crate::domain::foundation::{DomainError, ProjectId, ProposalId, TemplateId, Timestamp};
use crate::domain::proposal::Proposal;
use crate::ports::ProposalRepository;

#[derive(Clone)]
pub struct PostgresProposalRepository {
    pool: PgPool,
}

impl PostgresProposalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProposalRepository for PostgresProposalRepository {
    async fn save(&self, proposal: &Proposal) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO proposals (id, project_id, template_id, content, file_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(proposal.id.as_uuid())
        .bind(proposal.project_id.as_uuid())
        .bind(proposal.template_id.as_uuid())
        .bind(&proposal.content)
        .bind(&proposal.file_url)
        .bind(proposal.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert proposal", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, template_id, content, file_url, created_at
            FROM proposals WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch proposal", e))?;

        row.map(row_to_proposal).transpose()
    }
}

fn row_to_proposal(row: PgRow) -> Result<Proposal, DomainError> {
    Ok(Proposal {
        id: ProposalId::from_uuid(row.try_get("id").map_err(row_error)?),
        project_id: ProjectId::from_uuid(row.try_get("project_id").map_err(row_error)?),
        template_id: TemplateId::from_uuid(row.try_get("template_id").map_err(row_error)?),
        content: row.try_get("content").map_err(row_error)?,
        file_url: row.try_get("file_url").map_err(row_error)?,
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(row_error)?),
    })
}
