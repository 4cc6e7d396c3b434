//! Token entities for JWT-based session authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Default token validity window (1 hour)
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 3600;

/// Default JWT issuer
pub const DEFAULT_ISSUER: &str = "profile-system";

/// Claims structure for JWT payload
///
/// Every field is required when decoding; a payload of any other shape is
/// rejected rather than partially accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier the session belongs to
    pub user_id: String,

    /// Issuer
    pub iss: String,

    /// Subject (same as `user_id` for issued tokens)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims valid from now for `expiry_seconds`
    ///
    /// # Arguments
    ///
    /// * `user_id` - The session's user identifier, also used as subject
    /// * `issuer` - Issuer identifier
    /// * `expiry_seconds` - Validity window length
    ///
    /// # Returns
    ///
    /// `None` when the expiry falls outside the representable time range
    pub fn new(user_id: impl Into<String>, issuer: impl Into<String>, expiry_seconds: i64) -> Option<Self> {
        Self::issued_at(user_id, issuer, Utc::now(), expiry_seconds)
    }

    /// Creates claims with an explicit issue time
    pub fn issued_at(
        user_id: impl Into<String>,
        issuer: impl Into<String>,
        issued_at: DateTime<Utc>,
        expiry_seconds: i64,
    ) -> Option<Self> {
        let expiry = issued_at.checked_add_signed(Duration::try_seconds(expiry_seconds)?)?;
        let user_id = user_id.into();

        Some(Self {
            sub: user_id.clone(),
            user_id,
            iss: issuer.into(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
        })
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_else(Utc::now)
    }
}

/// A freshly signed session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Serialized JWT
    pub token: String,

    /// Validity window in seconds
    pub expires_in: i64,

    /// Absolute expiry
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("alice", DEFAULT_ISSUER, DEFAULT_TOKEN_EXPIRY_SECONDS).unwrap();

        assert_eq!(claims.user_id, "alice");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iss, DEFAULT_ISSUER);
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_EXPIRY_SECONDS);
        assert!(claims.iat <= Utc::now().timestamp());
    }

    #[test]
    fn test_issued_at_sets_window() {
        let issued = Utc::now() - Duration::hours(2);
        let claims = Claims::issued_at("bob", DEFAULT_ISSUER, issued, 60).unwrap();

        assert_eq!(claims.iat, issued.timestamp());
        assert_eq!(claims.exp, issued.timestamp() + 60);
        assert!(claims.exp < Utc::now().timestamp());
    }

    #[test]
    fn test_out_of_range_expiry_is_none() {
        assert!(Claims::new("alice", DEFAULT_ISSUER, i64::MAX / 2).is_none());
        assert!(Claims::new("alice", DEFAULT_ISSUER, i64::MAX).is_none());
        assert!(Claims::issued_at("alice", DEFAULT_ISSUER, DateTime::<Utc>::MAX_UTC, 1).is_none());
    }

    #[test]
    fn test_claims_json_shape() {
        let claims = Claims::issued_at("alice", "issuer", Utc.timestamp_opt(1_700_000_000, 0).unwrap(), 10).unwrap();
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "user_id": "alice",
                "iss": "issuer",
                "sub": "alice",
                "iat": 1_700_000_000,
                "exp": 1_700_000_010,
            })
        );
    }

    #[test]
    fn test_claims_missing_user_id_rejected() {
        let payload = serde_json::json!({
            "iss": "issuer",
            "sub": "alice",
            "iat": 1,
            "exp": 2,
        });
        assert!(serde_json::from_value::<Claims>(payload).is_err());
    }
}
