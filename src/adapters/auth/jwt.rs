//! HS256 JWT adapter for bearer token validation.
//!
//! Tokens are issued by the hosted auth backend and signed with a shared
//! secret. This adapter validates:
//!
//! - **Signature**: HS256 with the configured secret
//! - **Audience (aud)**: Must contain the configured audience
//! - **Expiry (exp)**: Must be in the future
//!
//! and maps `sub`/`email` to the domain `AuthenticatedUser`.
//!
//! # Example
//!
//! ```ignore
//! let validator = JwtSessionValidator::new(JwtConfig::new(secret, "authenticated"));
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for the JWT adapter.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 signing secret.
    pub secret: Secret<String>,

    /// Expected audience claim.
    pub audience: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            audience: audience.into(),
        }
    }
}

/// Claims carried by access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub sub: String,

    #[serde(default)]
    pub aud: Audience,

    /// Expiry timestamp (Unix epoch seconds)
    pub exp: i64,

    #[serde(default)]
    pub email: Option<String>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// Validates HS256 bearer tokens.
pub struct JwtSessionValidator {
    audience: String,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.expose_secret().as_bytes()),
            audience: config.audience,
            validation,
        }
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!("Invalid audience in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            })
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode_claims(token)?;

        if !claims.aud.contains(&self.audience) {
            tracing::warn!("Audience mismatch: got '{:?}'", claims.aud);
            return Err(AuthError::InvalidToken);
        }

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, claims.email))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-with-enough-entropy";

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(JwtConfig::new(SECRET, "authenticated"))
    }

    fn token(sub: &str, aud: Audience, exp_offset_secs: i64, secret: &str) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            aud,
            exp: chrono::Utc::now().timestamp() + exp_offset_secs,
            email: Some("pm@example.com".to_string()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let jwt = token("user-1", Audience::Single("authenticated".into()), 3600, SECRET);

        let user = validator().validate(&jwt).await.unwrap();

        assert_eq!(user.id.as_str(), "user-1");
        assert_eq!(user.email.as_deref(), Some("pm@example.com"));
    }

    #[tokio::test]
    async fn accepts_audience_list() {
        let aud = Audience::Multiple(vec!["other".into(), "authenticated".into()]);
        let jwt = token("user-1", aud, 3600, SECRET);

        assert!(validator().validate(&jwt).await.is_ok());
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let jwt = token("user-1", Audience::Single("authenticated".into()), -3600, SECRET);

        let err = validator().validate(&jwt).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let jwt = token("user-1", Audience::Single("authenticated".into()), 3600, "other-secret");

        let err = validator().validate(&jwt).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let jwt = token("user-1", Audience::Single("anon".into()), 3600, SECRET);

        let err = validator().validate(&jwt).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        let err = validator().validate("not.a.jwt").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn audience_contains() {
        assert!(Audience::Single("a".into()).contains("a"));
        assert!(!Audience::None.contains("a"));
        assert!(Audience::Multiple(vec!["a".into(), "b".into()]).contains("b"));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let rendered = format!("{:?}", validator());
        assert!(!rendered.contains(SECRET));
    }
}
