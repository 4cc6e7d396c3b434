//! Domain entities representing core business objects.

pub mod profile;
pub mod token;

// Re-export commonly used types
pub use profile::Profile;
pub use token::{Claims, IssuedToken, DEFAULT_ISSUER, DEFAULT_TOKEN_EXPIRY_SECONDS};
