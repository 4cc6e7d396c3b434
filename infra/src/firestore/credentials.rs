//! Service-account authentication for the Firestore REST API
//!
//! A signed RS256 assertion is exchanged at the key's `token_uri` for a
//! short-lived OAuth2 access token, which is cached until shortly before
//! it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::InfrastructureError;

/// OAuth2 scope granting Firestore access
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// Grant type for the JWT-bearer token exchange
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Bearer token accepted by the Firestore emulator
const EMULATOR_BEARER: &str = "owner";

/// Lifetime requested for each assertion
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Cached tokens are refreshed this long before they expire
const REFRESH_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    String::from("https://oauth2.googleapis.com/token")
}

/// The fields of a Google service-account JSON key this client needs
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text
    pub fn from_json(json: &str) -> Result<Self, InfrastructureError> {
        serde_json::from_str(json)
            .map_err(|e| InfrastructureError::Credentials(format!("Invalid service account key: {}", e)))
    }

    /// Read and parse a key file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InfrastructureError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            InfrastructureError::Credentials(format!(
                "Failed to read service account key {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&json)
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// Claims of the JWT-bearer assertion
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Whether the token can still be used at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Access tokens minted from a service-account key
pub struct ServiceAccountTokenSource {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: reqwest::Client,
    cache: RwLock<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    /// Create a token source
    ///
    /// # Returns
    ///
    /// * `Ok(ServiceAccountTokenSource)` - The private key parsed
    /// * `Err(InfrastructureError::Credentials)` - The private key is not a valid RSA PEM
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Result<Self, InfrastructureError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| InfrastructureError::Credentials(format!("Invalid private key format: {}", e)))?;

        info!(client_email = %key.client_email, "Loaded Firestore service account");

        Ok(Self {
            key,
            encoding_key,
            http,
            cache: RwLock::new(None),
        })
    }

    pub(crate) fn assertion_claims(&self, now: DateTime<Utc>) -> AssertionClaims {
        AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: DATASTORE_SCOPE.to_string(),
            aud: self.key.token_uri.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        }
    }

    /// Signed assertion presented at the token endpoint
    pub(crate) fn signed_assertion(&self, now: DateTime<Utc>) -> Result<String, InfrastructureError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &self.assertion_claims(now), &self.encoding_key)
            .map_err(|e| InfrastructureError::Credentials(format!("Failed to sign assertion: {}", e)))
    }

    /// Current access token, fetching a new one when the cached one is stale
    pub async fn access_token(&self) -> Result<String, InfrastructureError> {
        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.value.clone());
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(cached) = cache.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.value.clone());
            }
        }

        let fresh = self.fetch_access_token().await?;
        let value = fresh.value.clone();
        *cache = Some(fresh);
        Ok(value)
    }

    async fn fetch_access_token(&self) -> Result<CachedToken, InfrastructureError> {
        let now = Utc::now();
        let assertion = self.signed_assertion(now)?;

        debug!(token_uri = %self.key.token_uri, "Requesting Firestore access token");

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Credentials(format!(
                "Token exchange failed with status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let token: AccessTokenResponse = response.json().await?;

        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

/// Source of the bearer token sent with each Firestore request
pub enum CredentialsProvider {
    /// Firestore emulator; no real credentials
    Emulator,
    /// Production Firestore via a service account
    ServiceAccount(ServiceAccountTokenSource),
}

impl CredentialsProvider {
    pub async fn bearer_token(&self) -> Result<String, InfrastructureError> {
        match self {
            CredentialsProvider::Emulator => Ok(EMULATOR_BEARER.to_string()),
            CredentialsProvider::ServiceAccount(source) => source.access_token().await,
        }
    }
}
