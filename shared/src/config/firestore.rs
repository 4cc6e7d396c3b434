//! Document store configuration

use serde::{Deserialize, Serialize};

/// Environment variable honoured by Google client libraries for the emulator
pub const EMULATOR_HOST_ENV: &str = "FIRESTORE_EMULATOR_HOST";

/// Which profile store backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Google Cloud Firestore
    #[default]
    Firestore,
    /// Process-local store, lost on restart
    Memory,
}

/// Firestore connection and document location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FirestoreConfig {
    /// GCP project id
    pub project_id: String,

    /// Path to the service-account JSON key
    #[serde(default)]
    pub credentials: Option<String>,

    /// Firestore database id
    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// Collection holding the profile document
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Id of the single profile document
    #[serde(default = "default_document_id")]
    pub document_id: String,

    /// `host:port` of a Firestore emulator
    #[serde(default)]
    pub emulator_host: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            credentials: None,
            database_id: default_database_id(),
            collection: default_collection(),
            document_id: default_document_id(),
            emulator_host: None,
            request_timeout_secs: default_request_timeout(),
        }
    }

    /// Emulator host from config, falling back to `FIRESTORE_EMULATOR_HOST`
    pub fn resolved_emulator_host(&self) -> Option<String> {
        self.emulator_host
            .clone()
            .or_else(|| std::env::var(EMULATOR_HOST_ENV).ok())
            .filter(|h| !h.trim().is_empty())
    }
}

fn default_database_id() -> String {
    String::from("(default)")
}

fn default_collection() -> String {
    String::from("profiles")
}

fn default_document_id() -> String {
    String::from("default")
}

fn default_request_timeout() -> u64 {
    10
}
