pub mod profile;

pub use profile::{InMemoryProfileRepository, ProfileRepository};
