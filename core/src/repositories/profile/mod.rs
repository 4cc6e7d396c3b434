pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use memory::InMemoryProfileRepository;
pub use r#trait::ProfileRepository;

#[cfg(test)]
mod tests;
