//! Profile service reading and overwriting the stored profile

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::profile::Profile;
use crate::errors::DomainResult;
use crate::repositories::ProfileRepository;

/// Use cases for the basic-info profile record
pub struct ProfileService<R>
where
    R: ProfileRepository,
{
    /// Backing store for the single profile document
    repository: Arc<R>,
}

impl<R> ProfileService<R>
where
    R: ProfileRepository,
{
    /// Create a new profile service
    ///
    /// # Arguments
    ///
    /// * `repository` - Store holding the profile document
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Read the stored basic info
    ///
    /// A record that was never written reads as `Profile::default()`.
    pub async fn get_basic_info(&self) -> DomainResult<Profile> {
        let profile = self.repository.find_profile().await?;
        if profile.is_none() {
            debug!("No stored profile, returning empty record");
        }
        Ok(profile.unwrap_or_default())
    }

    /// Overwrite the stored basic info
    ///
    /// # Arguments
    ///
    /// * `user_id` - Authenticated caller, recorded in the log only
    /// * `profile` - Replacement record
    pub async fn update_basic_info(&self, user_id: &str, profile: Profile) -> DomainResult<Profile> {
        let saved = self.repository.save_profile(profile).await?;
        info!(user_id = %user_id, "Profile basic info updated");
        Ok(saved)
    }
}

impl<R> Clone for ProfileService<R>
where
    R: ProfileRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
