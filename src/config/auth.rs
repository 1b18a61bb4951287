//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest HS256 secret accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Bearer token settings (HS256 JWTs from the hosted auth backend)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared signing secret
    pub jwt_secret: String,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub jwt_audience: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Production requires a secret of at least
    /// [`MIN_PRODUCTION_SECRET_LEN`] characters.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if self.jwt_audience.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_AUDIENCE"));
        }
        if *environment == Environment::Production && self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_audience: default_audience(),
        }
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}
