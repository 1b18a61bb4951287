//! Document aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    DocumentId, DomainError, Percentage, ProjectId, Timestamp, UserId,
};

/// Kind of source file a document was registered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    Text,
    Pdf,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Text => "text",
            DocType::Pdf => "pdf",
        }
    }

    /// MIME type used when storing the uploaded body.
    pub fn content_type(&self) -> &'static str {
        match self {
            DocType::Text => "text/plain; charset=utf-8",
            DocType::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(DocType::Text),
            "pdf" => Ok(DocType::Pdf),
            other => Err(DomainError::validation(
                "doc_type",
                format!("Unknown document type: {}", other),
            )),
        }
    }
}

/// One heading plus body inside a generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub content: String,
}

impl Section {
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
        }
    }
}

/// JSON body stored on every document row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContent {
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub progress: Percentage,
}

impl DocumentContent {
    /// Content for a freshly registered document.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
            progress: Percentage::ZERO,
        }
    }

    /// Canned content written when generation cannot proceed.
    pub fn sample(title: impl Into<String>, reason: &str) -> Self {
        Self {
            title: title.into(),
            sections: vec![Section::new(
                "Sample section",
                format!(
                    "{}. The following is a sample document.",
                    reason.trim_end_matches('.')
                ),
            )],
            progress: Percentage::HUNDRED,
        }
    }

    /// Number of sections, counting an empty body as one unit of work.
    pub fn complexity(&self) -> usize {
        self.sections.len().max(1)
    }
}

/// Document aggregate.
///
/// # Invariants
///
/// - `content.title` is non-empty and contains no path separators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    project_id: ProjectId,
    created_by: UserId,
    doc_type: DocType,
    content: DocumentContent,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Document {
    /// Registers a new document with no sections.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is blank or looks like a path
    pub fn register(
        project_id: ProjectId,
        created_by: UserId,
        doc_type: DocType,
        title: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("title", "Document title cannot be empty"));
        }
        if title.contains('/') || title.contains('\\') || title == ".." || title == "." {
            return Err(DomainError::validation(
                "title",
                "Document title cannot contain path separators",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: DocumentId::new(),
            project_id,
            created_by,
            doc_type,
            content: DocumentContent::empty(title),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a document from persistence (no validation).
    pub fn reconstitute(
        id: DocumentId,
        project_id: ProjectId,
        created_by: UserId,
        doc_type: DocType,
        content: DocumentContent,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            project_id,
            created_by,
            doc_type,
            content,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn doc_type(&self) -> DocType {
        self.doc_type
    }

    pub fn content(&self) -> &DocumentContent {
        &self.content
    }

    pub fn title(&self) -> &str {
        &self.content.title
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Storage key of the uploaded body: `{created_by}/{title}`.
    pub fn storage_key(&self) -> String {
        format!("{}/{}", self.created_by, self.content.title)
    }

    /// Mirrors pipeline progress into the stored content.
    pub fn set_progress(&mut self, progress: Percentage) {
        self.content.progress = progress;
        self.updated_at = Timestamp::now();
    }

    /// Replaces the sections and marks the document fully generated.
    pub fn apply_sections(&mut self, sections: Vec<Section>) {
        self.content.sections = sections;
        self.content.progress = Percentage::HUNDRED;
        self.updated_at = Timestamp::now();
    }

    /// Writes the canned sample content, keeping the title.
    pub fn apply_sample(&mut self, reason: &str) {
        self.content = DocumentContent::sample(self.content.title.clone(), reason);
        self.updated_at = Timestamp::now();
    }
}
