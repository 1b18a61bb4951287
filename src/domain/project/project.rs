//! Project aggregate.
//!
//! Projects are the top-level container. Documents, source codes, checks,
//! estimates, reports and proposals all reference a project by ID.

use crate::domain::foundation::{DomainError, ProjectId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Maximum length for a project name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Project aggregate.
///
/// # Invariants
///
/// - `name` is 1-200 characters after trimming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    created_by: UserId,
    created_at: Timestamp,
}

impl Project {
    /// Creates a new project owned by `created_by`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is empty or too long
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        created_by: UserId,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        Self::validate_name(&name)?;

        Ok(Self {
            id: ProjectId::new(),
            name,
            description: description.into(),
            created_by,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a project from persistence (no validation).
    pub fn reconstitute(
        id: ProjectId,
        name: String,
        description: String,
        created_by: UserId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            description,
            created_by,
            created_at,
        }
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::validation("name", "Project name cannot be empty"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Project name cannot exceed {} characters", MAX_NAME_LENGTH),
            ));
        }
        Ok(())
    }
}
