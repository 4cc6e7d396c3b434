//! Business services containing domain logic and use cases.

pub mod profile;
pub mod token;

// Re-export commonly used types
pub use profile::ProfileService;
pub use token::{TokenService, TokenServiceConfig};
