//! Main token service implementation

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use ps_shared::config::auth::MAX_TOKEN_EXPIRY_SECONDS;

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Algorithm used for issued tokens
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// HMAC family; tokens declaring anything else are refused before signature checks
pub const ALLOWED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Registered claims every token must carry
const REQUIRED_CLAIMS: [&str; 4] = ["exp", "iat", "iss", "sub"];

/// Issues and verifies HMAC-signed session tokens
///
/// Immutable after construction; share it behind an `Arc`.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or a validation error if the secret is empty
    /// or the expiry is outside `1..=MAX_TOKEN_EXPIRY_SECONDS`
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.secret.is_empty() {
            return Err(DomainError::Validation {
                message: "token secret must not be empty".to_string(),
            });
        }
        if config.token_expiry_seconds <= 0 || config.token_expiry_seconds > MAX_TOKEN_EXPIRY_SECONDS {
            return Err(DomainError::Validation {
                message: format!(
                    "token expiry must be between 1 and {} seconds",
                    MAX_TOKEN_EXPIRY_SECONDS
                ),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = ALLOWED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&REQUIRED_CLAIMS);
        if let Some(issuer) = &config.expected_issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Issues a session token for `user_id`
    ///
    /// # Arguments
    ///
    /// * `user_id` - Identifier placed in both `user_id` and `sub`
    /// * `issuer` - Value for the `iss` claim
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - The signed token and its validity window
    /// * `Err(DomainError)` - Empty user id or signing failure
    pub fn issue(&self, user_id: &str, issuer: &str) -> Result<IssuedToken, DomainError> {
        if user_id.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "user_id must not be empty".to_string(),
            });
        }

        let claims = Claims::new(user_id, issuer, self.config.token_expiry_seconds)
            .ok_or(DomainError::Token(TokenError::GenerationFailed))?;
        let token = self.sign(&claims)?;

        debug!(user_id = %user_id, exp = claims.exp, "Issued session token");

        Ok(IssuedToken {
            token,
            expires_in: self.config.token_expiry_seconds,
            expires_at: claims.expires_at(),
        })
    }

    /// Signs arbitrary claims with the configured secret
    pub fn sign(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(SIGNING_ALGORITHM);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            debug!(error = %e, "Token signing failed");
            DomainError::Token(TokenError::GenerationFailed)
        })
    }

    /// Verifies a token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, algorithm and validity window all check out
    /// * `Err(DomainError::Token(_))` - The specific reason the token was refused
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "Token header could not be decoded");
            TokenError::Malformed
        })?;

        if !ALLOWED_ALGORITHMS.contains(&header.alg) {
            return Err(TokenError::DisallowedAlgorithm {
                algorithm: format!("{:?}", header.alg),
            }
            .into());
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(map_jwt_error)?
            .claims;

        if claims.user_id.trim().is_empty() {
            return Err(TokenError::MissingClaim {
                claim: "user_id".to_string(),
            }
            .into());
        }

        if claims.iat > Utc::now().timestamp() {
            return Err(TokenError::NotYetValid.into());
        }

        Ok(claims)
    }

    /// Validity window of issued tokens, in seconds
    pub fn token_expiry_seconds(&self) -> i64 {
        self.config.token_expiry_seconds
    }
}

fn map_jwt_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::ImmatureSignature => TokenError::NotYetValid,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName | ErrorKind::MissingAlgorithm => {
            TokenError::DisallowedAlgorithm {
                algorithm: "unsupported".to_string(),
            }
        }
        ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim { claim: claim.clone() },
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::Json(_) => TokenError::InvalidClaims,
        _ => TokenError::Malformed,
    }
}
