//! Proposal module - generated proposal documents.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProjectId, ProposalId, TemplateId, Timestamp};

/// Text substituted when a proposal stage cannot produce content.
pub const SAMPLE_PROPOSAL: &str = "Sample proposal content: this is a sample proposal. \
The detailed content is generated by the live system.";

/// A stored proposal and where its rendered file lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub project_id: ProjectId,
    pub template_id: TemplateId,
    pub content: String,
    pub file_url: String,
    pub created_at: Timestamp,
}

impl Proposal {
    pub fn new(
        project_id: ProjectId,
        template_id: TemplateId,
        content: impl Into<String>,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            id: ProposalId::new(),
            project_id,
            template_id,
            content: content.into(),
            file_url: file_url.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Object key for the rendered file: `proposal_{project}_{millis}.md`.
    pub fn object_key(project_id: &ProjectId, at: &Timestamp) -> String {
        format!("proposal_{}_{}.md", project_id, at.as_unix_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn object_key_embeds_project_and_millis() {
        let project = ProjectId::new();
        let at = Timestamp::from_datetime(Utc.timestamp_millis_opt(1_700_000_000_123).unwrap());
        assert_eq!(
            Proposal::object_key(&project, &at),
            format!("proposal_{}_1700000000123.md", project)
        );
    }
}
