//! Minimal Firestore REST client
//!
//! Covers the two document operations the profile store needs: reading a
//! document and replacing it wholesale.

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use ps_shared::config::FirestoreConfig;

use super::credentials::{CredentialsProvider, ServiceAccountKey, ServiceAccountTokenSource};
use crate::InfrastructureError;

/// Production Firestore endpoint
const FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com/v1";

/// Documents root for a project and database
///
/// Points at the emulator when `emulator_host` is given.
pub(crate) fn documents_base_url(config: &FirestoreConfig, emulator_host: Option<&str>) -> String {
    let endpoint = match emulator_host {
        Some(host) => format!("http://{}/v1", host.trim_end_matches('/')),
        None => FIRESTORE_ENDPOINT.to_string(),
    };

    format!(
        "{}/projects/{}/databases/{}/documents",
        endpoint, config.project_id, config.database_id
    )
}

/// Firestore REST client
pub struct FirestoreClient {
    http: reqwest::Client,
    base_url: String,
    credentials: CredentialsProvider,
}

impl FirestoreClient {
    /// Create a client from configuration
    ///
    /// Uses the emulator when one is configured, otherwise loads the
    /// service-account key named by `credentials`.
    pub fn new(config: &FirestoreConfig) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let emulator_host = config.resolved_emulator_host();
        let credentials = match (&emulator_host, &config.credentials) {
            (Some(host), _) => {
                info!(emulator_host = %host, "Using Firestore emulator");
                CredentialsProvider::Emulator
            }
            (None, Some(path)) => {
                let key = ServiceAccountKey::from_file(path)?;
                CredentialsProvider::ServiceAccount(ServiceAccountTokenSource::new(key, http.clone())?)
            }
            (None, None) => {
                return Err(InfrastructureError::Config(
                    "firestore.credentials is required unless an emulator host is set".to_string(),
                ))
            }
        };

        let base_url = documents_base_url(config, emulator_host.as_deref());
        info!(project_id = %config.project_id, database_id = %config.database_id, "Firestore client initialized");

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// URL of a single document
    pub fn document_url(&self, collection: &str, document_id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, document_id)
    }

    /// Fetch a document
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Value))` - The raw document resource
    /// * `Ok(None)` - The document does not exist
    /// * `Err(InfrastructureError)` - Transport, auth or server failure
    pub async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<Value>, InfrastructureError> {
        let url = self.document_url(collection, document_id);
        let token = self.credentials.bearer_token().await?;

        debug!(collection = %collection, document_id = %document_id, "Fetching Firestore document");

        let response = self.http.get(&url).bearer_auth(token).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(collection = %collection, document_id = %document_id, "Firestore document not found");
            return Ok(None);
        }

        let response = check_status(response).await?;
        Ok(Some(response.json().await?))
    }

    /// Create or replace a document with `body` (`{"fields": ...}`)
    ///
    /// No update mask is sent, so fields missing from `body` are removed.
    pub async fn set_document(
        &self,
        collection: &str,
        document_id: &str,
        body: &Value,
    ) -> Result<Value, InfrastructureError> {
        let url = self.document_url(collection, document_id);
        let token = self.credentials.bearer_token().await?;

        debug!(collection = %collection, document_id = %document_id, "Writing Firestore document");

        let response = self.http.patch(&url).bearer_auth(token).json(body).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, InfrastructureError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| status.to_string());
    error!(status = status.as_u16(), reason = %message, "Firestore request failed");

    Err(InfrastructureError::Firestore {
        status: status.as_u16(),
        message,
    })
}

/// Pulls `error.message` out of a Google API error body
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
