//! Strongly-typed identifier value objects.
//!
//! Every persisted aggregate gets its own UUID newtype so that a document id
//! can never be passed where a project id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a project.
    ProjectId
);
uuid_id!(
    /// Unique identifier for an uploaded or generated document.
    DocumentId
);
uuid_id!(
    /// Unique identifier for a generated source file.
    SourceCodeId
);
uuid_id!(
    /// Unique identifier for a quality or consistency check record.
    QualityCheckId
);
uuid_id!(
    /// Unique identifier for a work estimate.
    WorkEstimateId
);
uuid_id!(
    /// Unique identifier for a stored progress report.
    ProgressReportId
);
uuid_id!(
    /// Unique identifier for a generated proposal.
    ProposalId
);
uuid_id!(
    /// Unique identifier for a proposal template.
    TemplateId
);
uuid_id!(
    /// Unique identifier for an activity log entry.
    ActivityLogId
);
uuid_id!(
    /// Unique identifier for a background generation job.
    JobId
);

/// User identifier (the `sub` claim issued by the auth provider).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(ProjectId::new(), ProjectId::new());
        assert_ne!(JobId::new(), JobId::new());
    }

    #[test]
    fn id_parses_from_its_display_form() {
        let id = DocumentId::new();
        let parsed: DocumentId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_rejects_garbage() {
        assert!("not-a-uuid".parse::<ProjectId>().is_err());
    }

    #[test]
    fn id_serializes_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = SourceCodeId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn user_id_rejects_empty_string() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_displays_correctly() {
        let id = UserId::new("user-123").unwrap();
        assert_eq!(id.to_string(), "user-123");
        assert_eq!(id.as_str(), "user-123");
    }
}
