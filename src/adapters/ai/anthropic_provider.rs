//! Anthropic Provider - Implementation of AIProvider for the Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-3-5-haiku-latest")
//!     .with_base_url("https://api.anthropic.com");
//!
//! let provider = AnthropicProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

/// `max_tokens` is mandatory for this API.
const DEFAULT_MAX_TOKENS: u32 = 1500;

const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    api_key: Secret<String>,
    pub model: String,
    /// Base URL for the API (default: https://api.anthropic.com).
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-3-5-haiku-latest".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a new provider.
    ///
    /// # Errors
    ///
    /// Returns `AIError::InvalidRequest` if the HTTP client cannot be built.
    pub fn new(config: AnthropicConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn to_anthropic_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        // The system prompt travels in its own field.
        let messages = request
            .messages
            .iter()
            .filter_map(|msg| {
                let role = match msg.role {
                    MessageRole::System => return None,
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                };
                Some(AnthropicMessage {
                    role: role.to_string(),
                    content: msg.content.clone(),
                })
            })
            .collect();

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let body = self.to_anthropic_request(request);
        if body.messages.is_empty() {
            return Err(AIError::InvalidRequest(
                "at least one user message is required".to_string(),
            ));
        }

        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let error_body = response.text().await.unwrap_or_default();
        Err(Self::classify_error(status.as_u16(), &error_body))
    }

    fn classify_error(status: u16, error_body: &str) -> AIError {
        match status {
            401 | 403 => AIError::AuthenticationFailed,
            // 529 is Anthropic's "overloaded"
            429 => AIError::rate_limited(60),
            529 => AIError::unavailable(format!("Overloaded: {}", error_body)),
            400 => {
                if error_body.contains("prompt is too long") {
                    AIError::context_too_long(0, 0)
                } else {
                    AIError::InvalidRequest(error_body.to_string())
                }
            }
            500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
            _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
        }
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = Self::handle_response_status(response).await?;

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(self.build_completion(anthropic_response))
    }

    fn build_completion(&self, anthropic_response: AnthropicResponse) -> CompletionResponse {
        let content = anthropic_response
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        let finish_reason = match anthropic_response.stop_reason.as_deref() {
            Some("max_tokens") => FinishReason::Length,
            _ => FinishReason::Stop,
        };

        let usage = TokenUsage::new(
            anthropic_response.usage.input_tokens,
            anthropic_response.usage.output_tokens,
            self.calculate_cost(
                anthropic_response.usage.input_tokens,
                anthropic_response.usage.output_tokens,
            ),
        );

        CompletionResponse {
            content,
            usage,
            model: anthropic_response.model,
            finish_reason,
        }
    }

    /// Estimated cost in cents from per-1M-token prices.
    fn calculate_cost(&self, input_tokens: u32, output_tokens: u32) -> u32 {
        let (input_price, output_price) = match self.config.model.as_str() {
            m if m.contains("opus") => (1500, 7500),
            m if m.contains("sonnet") => (300, 1500),
            m if m.contains("haiku") => (80, 400),
            _ => (300, 1500),
        };

        let input_cost = (input_tokens as u64 * input_price) / 1_000_000;
        let output_cost = (output_tokens as u64 * output_price) / 1_000_000;

        (input_cost + output_cost) as u32
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            let attempt = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match attempt {
                Ok(completion) => {
                    debug!(
                        operation = %request.metadata.operation,
                        model = %completion.model,
                        tokens = completion.usage.total_tokens,
                        "anthropic completion"
                    );
                    return Ok(completion);
                }
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    warn!(
                        operation = %request.metadata.operation,
                        attempt = retry_count + 1,
                        error = %err,
                        "anthropic request failed, retrying"
                    );
                }
                Err(err) => return Err(err),
            }

            sleep(Duration::from_secs(1 << retry_count)).await;
            retry_count += 1;
        }
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        (text.len() / 4).max(1) as u32
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model, 200_000)
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    fn provider(model: &str) -> AnthropicProvider {
        AnthropicProvider::new(AnthropicConfig::new("test-key").with_model(model)).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = AnthropicConfig::new("test-key")
            .with_model("claude-3-opus-20240229")
            .with_base_url("https://custom.anthropic.com")
            .with_timeout(Duration::from_secs(120))
            .with_max_retries(5);

        assert_eq!(config.model, "claude-3-opus-20240229");
        assert_eq!(config.base_url, "https://custom.anthropic.com");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn system_prompt_moves_to_its_own_field() {
        let provider = provider("claude-3-5-haiku-latest");
        let request = CompletionRequest::new(RequestMetadata::new("test", None, "t"))
            .with_system_prompt("You are a project manager.")
            .with_message(MessageRole::System, "ignored")
            .with_message(MessageRole::User, "logs");

        let body = provider.to_anthropic_request(&request);
        assert_eq!(body.system.as_deref(), Some("You are a project manager."));
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
        assert_eq!(body.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn response_joins_text_blocks() {
        let provider = provider("claude-3-5-sonnet-latest");
        let raw: AnthropicResponse = serde_json::from_str(
            r#"{"model":"claude-3-5-sonnet-latest","stop_reason":"max_tokens",
               "content":[{"type":"text","text":"Hello "},{"type":"tool_use"},{"type":"text","text":"world"}],
               "usage":{"input_tokens":1000000,"output_tokens":0}}"#,
        )
        .unwrap();
        let completion = provider.build_completion(raw);
        assert_eq!(completion.content, "Hello world");
        assert_eq!(completion.finish_reason, FinishReason::Length);
        assert_eq!(completion.usage.estimated_cost_cents, 300);
    }

    #[test]
    fn status_classification() {
        assert!(matches!(
            AnthropicProvider::classify_error(401, ""),
            AIError::AuthenticationFailed
        ));
        assert!(AnthropicProvider::classify_error(529, "overloaded").is_retryable());
        assert!(AnthropicProvider::classify_error(429, "").is_retryable());
        assert!(matches!(
            AnthropicProvider::classify_error(400, "prompt is too long"),
            AIError::ContextTooLong { .. }
        ));
    }

    #[test]
    fn cost_calculation_opus() {
        let provider = provider("claude-3-opus-20240229");
        // 1M input at $15 = 1500 cents, 100k output at $75/1M = 750 cents
        assert_eq!(provider.calculate_cost(1_000_000, 100_000), 2250);
    }

    #[test]
    fn provider_info_reports_anthropic() {
        let info = provider("claude-3-5-haiku-latest").provider_info();
        assert_eq!(info.name, "anthropic");
        assert_eq!(info.max_context_tokens, 200_000);
    }
}
