//! Firestore document store
//!
//! The REST client authenticates either with a service-account key or,
//! against the emulator, with the fixed `owner` bearer token.

mod client;
mod credentials;
mod profile_repository;
pub mod value;

#[cfg(test)]
mod tests;

pub use client::FirestoreClient;
pub use credentials::{CredentialsProvider, ServiceAccountKey, ServiceAccountTokenSource};
pub use profile_repository::FirestoreProfileRepository;
