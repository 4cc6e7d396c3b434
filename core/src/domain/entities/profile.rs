//! Profile entity holding a user's basic biographical information.

use serde::{Deserialize, Serialize};

/// Basic profile information
///
/// A missing record reads as `Profile::default()`, every field empty.
/// Fields absent from a stored document decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Student identification number
    pub student_id: String,

    /// Faculty the student belongs to
    pub faculty: String,

    /// Family name
    pub last_name: String,

    /// Given name
    pub first_name: String,

    /// Preferred nickname
    pub nickname: String,

    /// Free-form self introduction
    pub self_introduction: String,
}
