//! Firestore-backed implementation of ProfileRepository

use async_trait::async_trait;
use tracing::debug;

use ps_core::domain::entities::profile::Profile;
use ps_core::errors::DomainError;
use ps_core::repositories::ProfileRepository;
use ps_shared::config::FirestoreConfig;

use super::client::FirestoreClient;
use super::value::{from_document, to_document};
use crate::InfrastructureError;

/// Stores the profile as one Firestore document
pub struct FirestoreProfileRepository {
    client: FirestoreClient,
    collection: String,
    document_id: String,
}

impl FirestoreProfileRepository {
    pub fn new(client: FirestoreClient, collection: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
            document_id: document_id.into(),
        }
    }

    /// Build the client and repository from configuration
    pub fn from_config(config: &FirestoreConfig) -> Result<Self, InfrastructureError> {
        let client = FirestoreClient::new(config)?;
        Ok(Self::new(client, config.collection.clone(), config.document_id.clone()))
    }
}

#[async_trait]
impl ProfileRepository for FirestoreProfileRepository {
    async fn find_profile(&self) -> Result<Option<Profile>, DomainError> {
        let document = self.client.get_document(&self.collection, &self.document_id).await?;

        match document {
            Some(document) => Ok(Some(from_document(&document)?)),
            None => Ok(None),
        }
    }

    async fn save_profile(&self, profile: Profile) -> Result<Profile, DomainError> {
        let body = to_document(&profile)?;
        self.client
            .set_document(&self.collection, &self.document_id, &body)
            .await?;

        debug!(collection = %self.collection, document_id = %self.document_id, "Profile document written");
        Ok(profile)
    }
}
