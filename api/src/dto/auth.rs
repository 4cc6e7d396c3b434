use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use ps_core::domain::entities::token::IssuedToken;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueTokenRequest {
    /// Identifier the session is issued for
    #[validate(length(min = 1, max = 256))]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
            expires_at: issued.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}
