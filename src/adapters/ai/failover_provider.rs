//! Failover AI Provider - Wrapper that provides automatic failover between providers.
//!
//! When the primary provider fails with a transient error (rate limit, unavailable),
//! automatically falls back to the secondary provider if configured.
//!
//! # Example
//!
//! ```ignore
//! let primary = Arc::new(OpenAIProvider::new(openai_config)?);
//! let fallback = Arc::new(AnthropicProvider::new(anthropic_config)?);
//!
//! let provider = FailoverAIProvider::new(primary).with_fallback(fallback);
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// AI provider wrapper with automatic failover support.
///
/// Every completion is logged with its operation, provider, model and
/// token usage so cost can be attributed per pipeline.
pub struct FailoverAIProvider {
    primary: Arc<dyn AIProvider>,
    fallback: Option<Arc<dyn AIProvider>>,
}

impl FailoverAIProvider {
    pub fn new(primary: Arc<dyn AIProvider>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn AIProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    fn log_usage(provider: &ProviderInfo, request: &CompletionRequest, response: &CompletionResponse) {
        info!(
            operation = %request.metadata.operation,
            trace_id = %request.metadata.trace_id,
            provider = %provider.name,
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            estimated_cost_cents = response.usage.estimated_cost_cents,
            "ai tokens used"
        );
    }
}

#[async_trait]
impl AIProvider for FailoverAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let err = match self.primary.complete(request.clone()).await {
            Ok(response) => {
                Self::log_usage(&self.primary.provider_info(), &request, &response);
                return Ok(response);
            }
            Err(err) => err,
        };

        let Some(fallback) = self.fallback.as_ref().filter(|_| err.is_retryable()) else {
            return Err(err);
        };

        let fallback_info = fallback.provider_info();
        warn!(
            operation = %request.metadata.operation,
            trace_id = %request.metadata.trace_id,
            primary = %self.primary.provider_info().name,
            fallback = %fallback_info.name,
            reason = %err,
            "ai provider failover"
        );

        let response = fallback.complete(request.clone()).await?;
        Self::log_usage(&fallback_info, &request, &response);
        Ok(response)
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        self.primary.estimate_tokens(text)
    }

    fn provider_info(&self) -> ProviderInfo {
        self.primary.provider_info()
    }
}
