//! In-process implementation of ProfileRepository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::profile::Profile;
use crate::errors::DomainError;

use super::r#trait::ProfileRepository;

/// Profile store kept in memory; contents are lost on restart
#[derive(Clone, Default)]
pub struct InMemoryProfileRepository {
    profile: Arc<RwLock<Option<Profile>>>,
}

impl InMemoryProfileRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `profile`
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile: Arc::new(RwLock::new(Some(profile))),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_profile(&self) -> Result<Option<Profile>, DomainError> {
        Ok(self.profile.read().await.clone())
    }

    async fn save_profile(&self, profile: Profile) -> Result<Profile, DomainError> {
        *self.profile.write().await = Some(profile.clone());
        Ok(profile)
    }
}
