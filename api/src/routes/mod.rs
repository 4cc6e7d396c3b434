//! Route handlers
//!
//! - `auth`: session token issuance, logout and the session echo
//! - `profile`: basic-info read and overwrite

pub mod auth;
pub mod profile;
