//! ContentGenerator - the single entry point pipelines use to call the LLM.
//!
//! Wraps an [`AIProvider`] with the defaults every pipeline shares (one
//! system prompt, one user prompt, a token cap) and offers helpers to dig
//! structured payloads out of free-form replies.

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::domain::foundation::ProjectId;
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Token cap applied to every generation request.
pub const DEFAULT_MAX_TOKENS: u32 = 1500;

#[derive(Clone)]
pub struct ContentGenerator {
    provider: Arc<dyn AIProvider>,
    max_tokens: u32,
}

impl ContentGenerator {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn provider_name(&self) -> String {
        self.provider.provider_info().name
    }

    /// Sends one system + user prompt pair and returns the trimmed reply.
    ///
    /// # Errors
    ///
    /// - Any provider error
    /// - `AIError::EmptyResponse` if the reply is blank
    pub async fn generate(
        &self,
        operation: &str,
        project_id: Option<ProjectId>,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, AIError> {
        let metadata = RequestMetadata::new(operation, project_id, uuid::Uuid::new_v4().to_string());
        let request = CompletionRequest::new(metadata)
            .with_system_prompt(system_prompt)
            .with_message(MessageRole::User, user_prompt)
            .with_max_tokens(self.max_tokens);

        tracing::debug!(operation, "requesting completion");
        let response = self.provider.complete(request).await?;

        let content = response.content.trim();
        if content.is_empty() {
            return Err(AIError::EmptyResponse);
        }
        Ok(content.to_string())
    }
}

impl std::fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("provider", &self.provider.provider_info().name)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Removes a surrounding markdown code fence (with optional language tag).
///
/// Replies without a fence are returned trimmed.
pub fn strip_code_fences(reply: &str) -> String {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Skip the info string ("json", "python", ...) on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim().to_string()
}

/// Finds the JSON payload in a reply.
///
/// Accepts a bare JSON value, a fenced block, or JSON embedded in prose
/// (from the first `{`/`[` to the last matching `}`/`]`).
pub fn extract_json(reply: &str) -> Option<String> {
    let unfenced = strip_code_fences(reply);
    if serde_json::from_str::<serde_json::Value>(&unfenced).is_ok() {
        return Some(unfenced);
    }

    let start = unfenced.find(['{', '['])?;
    let close = if unfenced[start..].starts_with('{') { '}' } else { ']' };
    let end = unfenced.rfind(close)?;
    if end <= start {
        return None;
    }

    let candidate = &unfenced[start..=end];
    serde_json::from_str::<serde_json::Value>(candidate)
        .ok()
        .map(|_| candidate.to_string())
}

/// Parses the JSON payload of a reply into `T`.
pub fn parse_json<T: DeserializeOwned>(reply: &str) -> Option<T> {
    let payload = extract_json(reply)?;
    serde_json::from_str(&payload).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};

    #[test]
    fn strips_fenced_code_with_language_tag() {
        let reply = "```python\nprint('hi')\n```";
        assert_eq!(strip_code_fences(reply), "print('hi')");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  const x = 1;  "), "const x = 1;");
    }

    #[test]
    fn extracts_bare_json() {
        assert_eq!(extract_json("[1, 2]").as_deref(), Some("[1, 2]"));
    }

    #[test]
    fn extracts_fenced_json() {
        let reply = "```json\n{\"score\": 90}\n```";
        assert_eq!(extract_json(reply).as_deref(), Some("{\"score\": 90}"));
    }

    #[test]
    fn extracts_json_wrapped_in_prose() {
        let reply = "Here are the issues:\n[{\"description\": \"x\"}]\nHope this helps.";
        assert_eq!(extract_json(reply).as_deref(), Some("[{\"description\": \"x\"}]"));
    }

    #[test]
    fn rejects_replies_without_json() {
        assert!(extract_json("No problems found.").is_none());
        assert!(parse_json::<Vec<String>>("{not json}").is_none());
    }

    #[tokio::test]
    async fn generate_sends_prompts_and_token_cap() {
        let provider = MockAIProvider::new().with_response("  reply  ");
        let generator = ContentGenerator::new(Arc::new(provider.clone()));

        let reply = generator
            .generate("document.generate", None, "You are a writer.", "Input text")
            .await
            .unwrap();

        assert_eq!(reply, "reply");
        let calls = provider.get_calls();
        assert_eq!(calls[0].system_prompt.as_deref(), Some("You are a writer."));
        assert_eq!(calls[0].last_user_message(), Some("Input text"));
        assert_eq!(calls[0].max_tokens, Some(DEFAULT_MAX_TOKENS));
        assert_eq!(calls[0].metadata.operation, "document.generate");
    }

    #[tokio::test]
    async fn blank_reply_is_an_error() {
        let provider = MockAIProvider::new().with_response("   ");
        let generator = ContentGenerator::new(Arc::new(provider));

        let err = generator.generate("op", None, "s", "u").await.unwrap_err();
        assert!(matches!(err, AIError::EmptyResponse));
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let generator = ContentGenerator::new(Arc::new(provider));

        let err = generator.generate("op", None, "s", "u").await.unwrap_err();
        assert!(matches!(err, AIError::AuthenticationFailed));
    }
}
