//! Profile repository trait defining the interface for profile persistence.

use async_trait::async_trait;

use crate::domain::entities::profile::Profile;
use crate::errors::DomainError;

/// Repository trait for the single stored profile document
///
/// Implementations read and overwrite exactly one record; there is no
/// per-user partitioning.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the stored profile
    ///
    /// # Returns
    /// * `Ok(Some(Profile))` - Profile found
    /// * `Ok(None)` - Nothing has been written yet
    /// * `Err(DomainError)` - The store failed
    async fn find_profile(&self) -> Result<Option<Profile>, DomainError>;

    /// Overwrite the stored profile wholesale
    ///
    /// # Returns
    /// * `Ok(Profile)` - The record as written
    /// * `Err(DomainError)` - The store failed
    async fn save_profile(&self, profile: Profile) -> Result<Profile, DomainError>;
}
