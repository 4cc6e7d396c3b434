//! Token error types
//!
//! Every variant is an authentication failure from the caller's point of
//! view. The distinction is kept for diagnostics only.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Disallowed signing algorithm: {algorithm}")]
    DisallowedAlgorithm { algorithm: String },

    #[error("Token expired")]
    Expired,

    #[error("Token not yet valid")]
    NotYetValid,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },

    #[error("Token generation failed")]
    GenerationFailed,
}

impl TokenError {
    /// Stable code for logs and metrics labels
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::Malformed => "TOKEN_MALFORMED",
            TokenError::InvalidSignature => "TOKEN_INVALID_SIGNATURE",
            TokenError::DisallowedAlgorithm { .. } => "TOKEN_DISALLOWED_ALGORITHM",
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::NotYetValid => "TOKEN_NOT_YET_VALID",
            TokenError::InvalidClaims => "TOKEN_INVALID_CLAIMS",
            TokenError::MissingClaim { .. } => "TOKEN_MISSING_CLAIM",
            TokenError::GenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}
