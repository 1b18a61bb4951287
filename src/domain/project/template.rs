//! Proposal templates.

use crate::domain::foundation::TemplateId;
use serde::{Deserialize, Serialize};

/// A reusable proposal skeleton that the proposal pipeline fills in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub content: String,
}

impl Template {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: TemplateId::new(),
            name: name.into(),
            content: content.into(),
        }
    }
}
