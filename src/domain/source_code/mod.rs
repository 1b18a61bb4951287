//! Source code module - files generated from documents.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ProjectId, SourceCodeId, Timestamp};

/// Target language for code generation.
///
/// Unrecognised names map to `Other` and produce a `.txt` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    JavaScript,
    Python,
    TypeScript,
    Java,
    CSharp,
    Other,
}

impl Language {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::Python => "py",
            Language::TypeScript => "ts",
            Language::Java => "java",
            Language::CSharp => "cs",
            Language::Other => "txt",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Other => "Other",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" => Language::JavaScript,
            "python" | "py" => Language::Python,
            "typescript" | "ts" => Language::TypeScript,
            "java" => Language::Java,
            "c#" | "csharp" | "cs" => Language::CSharp,
            _ => Language::Other,
        }
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Language::from_name(&value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.display_name().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCode {
    pub id: SourceCodeId,
    pub project_id: ProjectId,
    pub file_name: String,
    pub language: Language,
    pub content: String,
    pub created_at: Timestamp,
}

impl SourceCode {
    /// Creates a source file named after `title` with the language extension.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title has no usable characters
    pub fn generated(
        project_id: ProjectId,
        title: &str,
        language: Language,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let stem = slug(title);
        if stem.is_empty() {
            return Err(DomainError::validation(
                "title",
                "Cannot derive a file name from the document title",
            ));
        }
        Ok(Self {
            id: SourceCodeId::new(),
            project_id,
            file_name: format!("{}.{}", stem, language.extension()),
            language,
            content: content.into(),
            created_at: Timestamp::now(),
        })
    }

    /// Placeholder file stored when generation fails.
    pub fn sample_content(language: Language) -> String {
        let comment = match language {
            Language::Python => "#",
            Language::Other => "",
            _ => "//",
        };
        format!(
            "{} Code generation failed. This is a sample {} file.\n",
            comment,
            language.display_name()
        )
        .trim_start()
        .to_string()
    }
}

/// Lowercases and replaces runs of non-alphanumerics with `_`, dropping
/// any existing extension.
fn slug(title: &str) -> String {
    let stem = match title.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => title,
    };
    let mut out = String::with_capacity(stem.len());
    let mut pending_sep = false;
    for c in stem.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_follow_language() {
        assert_eq!(Language::from_name("JavaScript").extension(), "js");
        assert_eq!(Language::from_name("Python").extension(), "py");
        assert_eq!(Language::from_name("TypeScript").extension(), "ts");
        assert_eq!(Language::from_name("Java").extension(), "java");
        assert_eq!(Language::from_name("C#").extension(), "cs");
        assert_eq!(Language::from_name("Haskell").extension(), "txt");
    }

    #[test]
    fn language_serializes_as_display_name() {
        assert_eq!(serde_json::to_string(&Language::CSharp).unwrap(), "\"C#\"");
        let lang: Language = serde_json::from_str("\"python\"").unwrap();
        assert_eq!(lang, Language::Python);
    }

    #[test]
    fn file_name_is_slugged_title_plus_extension() {
        let code = SourceCode::generated(
            ProjectId::new(),
            "Login Flow Notes.txt",
            Language::TypeScript,
            "export {}",
        )
        .unwrap();
        assert_eq!(code.file_name, "login_flow_notes.ts");
    }

    #[test]
    fn unusable_title_is_rejected() {
        assert!(SourceCode::generated(ProjectId::new(), "...", Language::Java, "").is_err());
    }

    #[test]
    fn sample_content_uses_language_comment() {
        assert!(SourceCode::sample_content(Language::Python).starts_with("# "));
        assert!(SourceCode::sample_content(Language::Java).starts_with("// "));
        assert!(SourceCode::sample_content(Language::Other).starts_with("Code generation"));
    }
}
