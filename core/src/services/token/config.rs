//! Configuration for the token service

use ps_shared::config::JwtConfig;

use crate::domain::entities::token::DEFAULT_TOKEN_EXPIRY_SECONDS;

/// Configuration for the token service
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret
    pub secret: String,
    /// Token validity window in seconds
    pub token_expiry_seconds: i64,
    /// Reject tokens whose `iss` differs from this value
    pub expected_issuer: Option<String>,
}

impl TokenServiceConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_expiry_seconds: DEFAULT_TOKEN_EXPIRY_SECONDS,
            expected_issuer: None,
        }
    }

    pub fn with_expiry_seconds(mut self, seconds: i64) -> Self {
        self.token_expiry_seconds = seconds;
        self
    }

    pub fn with_expected_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = Some(issuer.into());
        self
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            secret: jwt.secret.clone(),
            token_expiry_seconds: jwt.token_expiry,
            expected_issuer: jwt.expected_issuer.clone(),
        }
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("secret", &"<redacted>")
            .field("token_expiry_seconds", &self.token_expiry_seconds)
            .field("expected_issuer", &self.expected_issuer)
            .finish()
    }
}
