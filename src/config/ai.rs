//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_TOKENS_LIMIT: u32 = 32_000;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,

    /// Primary AI provider
    #[serde(default = "default_provider")]
    pub primary_provider: AiProvider,

    /// Used when the primary fails with a retryable error
    pub fallback_provider: Option<AiProvider>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Completion cap for every pipeline call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAI,
    Anthropic,
    /// Canned responses; for local runs without API keys
    Mock,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    fn check_key(&self, provider: AiProvider) -> Result<(), ValidationError> {
        match provider {
            AiProvider::OpenAI if !self.has_openai() => {
                Err(ValidationError::MissingRequired("OPENAI_API_KEY"))
            }
            AiProvider::Anthropic if !self.has_anthropic() => {
                Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"))
            }
            _ => Ok(()),
        }
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.primary_provider != AiProvider::Mock && !self.has_openai() && !self.has_anthropic() {
            return Err(ValidationError::NoAiProviderConfigured);
        }
        self.check_key(self.primary_provider)?;
        if let Some(fallback) = self.fallback_provider {
            self.check_key(fallback)?;
        }
        if self.max_tokens == 0 || self.max_tokens > MAX_TOKENS_LIMIT {
            return Err(ValidationError::InvalidMaxTokens);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            openai_model: default_openai_model(),
            anthropic_model: default_anthropic_model(),
            primary_provider: default_provider(),
            fallback_provider: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_provider() -> AiProvider {
    AiProvider::OpenAI
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

fn default_max_tokens() -> u32 {
    1500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.primary_provider, AiProvider::OpenAI);
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 1500);
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_validation_no_provider() {
        let config = AiConfig::default();
        assert_eq!(config.validate(), Err(ValidationError::NoAiProviderConfigured));
    }

    #[test]
    fn test_mock_provider_needs_no_key() {
        let config = AiConfig {
            primary_provider: AiProvider::Mock,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_primary_missing_key() {
        let config = AiConfig {
            primary_provider: AiProvider::Anthropic,
            openai_api_key: Some("sk-xxx".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"))
        );
    }

    #[test]
    fn test_validation_fallback_missing_key() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            fallback_provider: Some(AiProvider::Anthropic),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_with_fallback() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            anthropic_api_key: Some("sk-ant-xxx".to_string()),
            fallback_provider: Some(AiProvider::Anthropic),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_max_tokens_bounds() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            max_tokens: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxTokens));
    }
}
