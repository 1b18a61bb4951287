//! HTTP DTOs for source-code endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::source_code::{Language, SourceCode};

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSourceCodeRequest {
    pub language: Language,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceCodeResponse {
    pub id: String,
    pub project_id: String,
    pub file_name: String,
    pub language: String,
    pub content: String,
    pub created_at: String,
}

impl From<SourceCode> for SourceCodeResponse {
    fn from(code: SourceCode) -> Self {
        Self {
            id: code.id.to_string(),
            project_id: code.project_id.to_string(),
            file_name: code.file_name,
            language: code.language.display_name().to_string(),
            content: code.content,
            created_at: code.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_names_are_case_insensitive() {
        let req: GenerateSourceCodeRequest =
            serde_json::from_str(r#"{"language":"TypeScript"}"#).unwrap();
        assert_eq!(req.language, Language::TypeScript);

        let req: GenerateSourceCodeRequest =
            serde_json::from_str(r#"{"language":"cobol"}"#).unwrap();
        assert_eq!(req.language, Language::Other);
    }
}
