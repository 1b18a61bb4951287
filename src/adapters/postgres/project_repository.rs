//! PostgreSQL implementation of ProjectRepository.
//!
//! Covers projects, proposal templates and activity logs.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{parse_user_id, row_error};
use crate::domain::foundation::{
    ActivityLogId, DomainError, ProjectId, TemplateId, Timestamp,
};
use crate::domain::project::{ActivityLog, ActivityStatus, Project, Template};
use crate::ports::ProjectRepository;

#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, name, description, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(project.id().as_uuid())
        .bind(project.name())
        .bind(project.description())
        .bind(project.created_by().as_str())
        .bind(project.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert project", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, description, created_by, created_at FROM projects WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch project", e))?;

        row.map(row_to_project).transpose()
    }

    async fn list(&self) -> Result<Vec<Project>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, created_by, created_at
            FROM projects
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list projects", e))?;

        rows.into_iter().map(row_to_project).collect()
    }

    async fn list_templates(&self) -> Result<Vec<Template>, DomainError> {
        let rows = sqlx::query("SELECT id, name, content FROM templates ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list templates", e))?;

        rows.into_iter().map(row_to_template).collect()
    }

    async fn find_template(&self, id: &TemplateId) -> Result<Option<Template>, DomainError> {
        let row = sqlx::query("SELECT id, name, content FROM templates WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch template", e))?;

        row.map(row_to_template).transpose()
    }

    async fn save_template(&self, template: &Template) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO templates (id, name, content) VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, content = EXCLUDED.content
            "#,
        )
        .bind(template.id.as_uuid())
        .bind(&template.name)
        .bind(&template.content)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save template", e))?;

        Ok(())
    }

    async fn record_activity(&self, log: &ActivityLog) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (id, project_id, phase, status, occurred_at, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(log.id.as_uuid())
        .bind(log.project_id.as_uuid())
        .bind(&log.phase)
        .bind(log.status.as_str())
        .bind(log.timestamp.as_datetime())
        .bind(&log.description)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert activity log", e))?;

        Ok(())
    }

    async fn activity_between(
        &self,
        project_id: &ProjectId,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<Vec<ActivityLog>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, project_id, phase, status, occurred_at, description
            FROM activity_logs
            WHERE project_id = $1 AND occurred_at >= $2 AND occurred_at <= $3
            ORDER BY occurred_at ASC
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(start.as_datetime())
        .bind(end.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch activity logs", e))?;

        rows.into_iter().map(row_to_activity).collect()
    }
}

fn row_to_project(row: PgRow) -> Result<Project, DomainError> {
    let created_by: String = row.try_get("created_by").map_err(row_error)?;

    Ok(Project::reconstitute(
        ProjectId::from_uuid(row.try_get("id").map_err(row_error)?),
        row.try_get("name").map_err(row_error)?,
        row.try_get("description").map_err(row_error)?,
        parse_user_id(&created_by)?,
        Timestamp::from_datetime(row.try_get("created_at").map_err(row_error)?),
    ))
}

fn row_to_template(row: PgRow) -> Result<Template, DomainError> {
    Ok(Template {
        id: TemplateId::from_uuid(row.try_get("id").map_err(row_error)?),
        name: row.try_get("name").map_err(row_error)?,
        content: row.try_get("content").map_err(row_error)?,
    })
}

fn row_to_activity(row: PgRow) -> Result<ActivityLog, DomainError> {
    let status: String = row.try_get("status").map_err(row_error)?;

    Ok(ActivityLog {
        id: ActivityLogId::from_uuid(row.try_get("id").map_err(row_error)?),
        project_id: ProjectId::from_uuid(row.try_get("project_id").map_err(row_error)?),
        phase: row.try_get("phase").map_err(row_error)?,
        status: status.parse::<ActivityStatus>()?,
        timestamp: Timestamp::from_datetime(row.try_get("occurred_at").map_err(row_error)?),
        description: row.try_get("description").map_err(row_error)?,
    })
}
