//! Authentication configuration: JWT signing and the session cookie

use serde::{Deserialize, Serialize};

/// Minimum secret length accepted in production
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Longest token validity window accepted (30 days)
pub const MAX_TOKEN_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify session tokens
    pub secret: String,

    /// Token validity window in seconds
    #[serde(default = "default_token_expiry")]
    pub token_expiry: i64,

    /// Issuer written into tokens issued by this service
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Only accept tokens carrying this issuer (any issuer when unset)
    #[serde(default)]
    pub expected_issuer: Option<String>,
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_expiry: default_token_expiry(),
            issuer: default_issuer(),
            expected_issuer: None,
        }
    }

    /// Set token expiry in minutes
    pub fn with_expiry_minutes(mut self, minutes: i64) -> Self {
        self.token_expiry = minutes * 60;
        self
    }
}

/// Cookie `SameSite` attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    Strict,
    #[default]
    Lax,
    None,
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Cookie path scope
    #[serde(default = "default_cookie_path")]
    pub path: String,

    /// Session cookie secure flag (HTTPS only)
    #[serde(default)]
    pub secure: bool,

    /// Session cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// Session cookie SameSite attribute
    #[serde(default)]
    pub same_site: SameSitePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            path: default_cookie_path(),
            secure: false,
            http_only: default_http_only(),
            same_site: SameSitePolicy::default(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Expose `POST /api/auth/token` for issuing session tokens
    #[serde(default)]
    pub allow_token_issuance: bool,
}

impl AuthConfig {
    pub fn new(jwt: JwtConfig) -> Self {
        Self {
            jwt,
            session: SessionConfig::default(),
            allow_token_issuance: false,
        }
    }
}

fn default_token_expiry() -> i64 {
    3600
}

fn default_issuer() -> String {
    String::from("profile-system")
}

fn default_cookie_name() -> String {
    String::from("auth_token")
}

fn default_cookie_path() -> String {
    String::from("/")
}

fn default_http_only() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_defaults() {
        let config = JwtConfig::new("my-secret").with_expiry_minutes(30);
        assert_eq!(config.token_expiry, 1800);
        assert_eq!(config.issuer, "profile-system");
        assert!(config.expected_issuer.is_none());
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "auth_token");
        assert_eq!(config.path, "/");
        assert!(config.http_only);
        assert!(!config.secure);
        assert_eq!(config.same_site, SameSitePolicy::Lax);
    }
}
