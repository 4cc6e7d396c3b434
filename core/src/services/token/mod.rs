//! Token service module for JWT session management
//!
//! This module handles:
//! - Session token issuance (HS256)
//! - Token verification with algorithm pinning to the HMAC family
//! - Mapping of every rejection to a distinct `TokenError`

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::{TokenService, ALLOWED_ALGORITHMS, SIGNING_ALGORITHM};
