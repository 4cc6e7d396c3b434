//! Shared configuration and common types for the profile system server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types and the YAML loader
//! - Error response structures and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, Environment, FirestoreConfig, JwtConfig,
    LoggingConfig, SameSitePolicy, SessionConfig, StorageBackend,
};
pub use errors::{error_codes, ErrorResponse};
