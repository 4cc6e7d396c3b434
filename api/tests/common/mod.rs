//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use actix_web::web;
use async_trait::async_trait;
use std::sync::Arc;

use ps_api::app::AppState;
use ps_core::domain::entities::profile::Profile;
use ps_core::errors::DomainError;
use ps_core::repositories::{InMemoryProfileRepository, ProfileRepository};
use ps_core::services::token::{TokenService, TokenServiceConfig};
use ps_shared::config::{AuthConfig, JwtConfig};

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const COOKIE_NAME: &str = "auth_token";

pub fn auth_config(allow_token_issuance: bool) -> AuthConfig {
    let mut auth = AuthConfig::new(JwtConfig::new(SECRET));
    auth.allow_token_issuance = allow_token_issuance;
    auth
}

pub fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(TokenServiceConfig::new(SECRET)).expect("token service"))
}

pub fn token_for(user_id: &str) -> String {
    token_service()
        .issue(user_id, "profile-system")
        .expect("issue token")
        .token
}

pub fn memory_state(auth: &AuthConfig) -> web::Data<AppState<InMemoryProfileRepository>> {
    web::Data::new(AppState::new(
        Arc::new(InMemoryProfileRepository::new()),
        token_service(),
        auth,
    ))
}

/// Store whose every call fails, for exercising 500 responses
pub struct UnavailableRepository;

#[async_trait]
impl ProfileRepository for UnavailableRepository {
    async fn find_profile(&self) -> Result<Option<Profile>, DomainError> {
        Err(DomainError::Storage {
            message: "Firestore error (503): The service is currently unavailable.".to_string(),
        })
    }

    async fn save_profile(&self, _profile: Profile) -> Result<Profile, DomainError> {
        Err(DomainError::Storage {
            message: "Firestore error (503): The service is currently unavailable.".to_string(),
        })
    }
}

pub fn sample_body() -> serde_json::Value {
    serde_json::json!({
        "student_id": "24X1234",
        "faculty": "Engineering",
        "last_name": "Yamada",
        "first_name": "Taro",
        "nickname": "taro",
        "self_introduction": "Hello, I like systems programming."
    })
}
