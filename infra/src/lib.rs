//! # Infrastructure Layer
//!
//! Concrete implementations of the core repository interfaces. The only
//! external dependency is Google Cloud Firestore, reached through its REST
//! API.
//!
//! ## Architecture
//!
//! - **Firestore**: REST client, service-account token source, typed value
//!   codec and the `ProfileRepository` implementation

use ps_core::errors::DomainError;

/// Firestore module - REST client and profile repository
pub mod firestore;

pub use firestore::{FirestoreClient, FirestoreProfileRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service-account key could not be read or used
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// Firestore answered with a non-success status
    #[error("Firestore error ({status}): {message}")]
    Firestore { status: u16, message: String },

    /// Document contents did not map onto the expected shape
    #[error("Codec error: {0}")]
    Codec(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Storage {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_error_maps_to_storage() {
        let error = InfrastructureError::Firestore {
            status: 403,
            message: "Missing or insufficient permissions.".to_string(),
        };

        match DomainError::from(error) {
            DomainError::Storage { message } => {
                assert_eq!(message, "Firestore error (403): Missing or insufficient permissions.");
            }
            other => panic!("expected storage error, got {:?}", other),
        }
    }
}
