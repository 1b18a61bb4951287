//! HTTP DTOs for document endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::document::{DocType, Document, Section};

/// Registers a document from its raw text.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDocumentRequest {
    pub title: String,
    #[serde(default = "default_doc_type")]
    pub doc_type: DocType,
    pub content: String,
}

fn default_doc_type() -> DocType {
    DocType::Text
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    pub id: String,
    pub project_id: String,
    pub created_by: String,
    pub doc_type: DocType,
    pub title: String,
    pub sections: Vec<Section>,
    pub progress: u8,
    pub complete: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Document> for DocumentResponse {
    fn from(document: &Document) -> Self {
        let content = document.content();
        Self {
            id: document.id().to_string(),
            project_id: document.project_id().to_string(),
            created_by: document.created_by().to_string(),
            doc_type: document.doc_type(),
            title: document.title().to_string(),
            sections: content.sections.clone(),
            progress: content.progress.value(),
            complete: content.progress.is_complete(),
            created_at: document.created_at().to_rfc3339(),
            updated_at: document.updated_at().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_type_defaults_to_text() {
        let req: RegisterDocumentRequest =
            serde_json::from_str(r#"{"title":"brief.txt","content":"hello"}"#).unwrap();
        assert_eq!(req.doc_type, DocType::Text);
    }

    #[test]
    fn pdf_doc_type_is_accepted() {
        let req: RegisterDocumentRequest =
            serde_json::from_str(r#"{"title":"a.pdf","doc_type":"pdf","content":""}"#).unwrap();
        assert_eq!(req.doc_type, DocType::Pdf);
    }
}
