//! Tests for the in-memory profile repository

use crate::domain::entities::profile::Profile;
use crate::repositories::{InMemoryProfileRepository, ProfileRepository};

fn sample_profile() -> Profile {
    Profile {
        student_id: "24X1234".to_string(),
        faculty: "Engineering".to_string(),
        last_name: "Yamada".to_string(),
        first_name: "Taro".to_string(),
        nickname: "taro".to_string(),
        self_introduction: "Hello!".to_string(),
    }
}

#[tokio::test]
async fn test_empty_repository_returns_none() {
    let repo = InMemoryProfileRepository::new();
    assert_eq!(repo.find_profile().await.unwrap(), None);
}

#[tokio::test]
async fn test_save_then_find() {
    let repo = InMemoryProfileRepository::new();
    let saved = repo.save_profile(sample_profile()).await.unwrap();
    assert_eq!(saved, sample_profile());
    assert_eq!(repo.find_profile().await.unwrap(), Some(sample_profile()));
}

#[tokio::test]
async fn test_save_overwrites_wholesale() {
    let repo = InMemoryProfileRepository::with_profile(sample_profile());
    let replacement = Profile {
        nickname: "new".to_string(),
        ..Default::default()
    };

    repo.save_profile(replacement.clone()).await.unwrap();
    assert_eq!(repo.find_profile().await.unwrap(), Some(replacement));
}

#[tokio::test]
async fn test_clones_share_state() {
    let repo = InMemoryProfileRepository::new();
    let clone = repo.clone();
    clone.save_profile(sample_profile()).await.unwrap();
    assert_eq!(repo.find_profile().await.unwrap(), Some(sample_profile()));
}
