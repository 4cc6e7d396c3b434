//! # Profile System Core
//!
//! Domain layer for the profile backend: the profile and token entities,
//! the token and profile services, the repository interface and the
//! error types shared by the outer crates.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::{Claims, IssuedToken, Profile};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{InMemoryProfileRepository, ProfileRepository};
pub use services::{ProfileService, TokenService, TokenServiceConfig};
