//! Request and response bodies for the basic-info endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

use ps_core::domain::entities::profile::Profile;

/// Body of `PUT /api/profile/basic-info`
///
/// Every field is required; empty strings are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BasicInfoRequest {
    #[validate(length(max = 32))]
    pub student_id: String,

    #[validate(length(max = 100))]
    pub faculty: String,

    #[validate(length(max = 64))]
    pub last_name: String,

    #[validate(length(max = 64))]
    pub first_name: String,

    #[validate(length(max = 64))]
    pub nickname: String,

    #[validate(length(max = 2000))]
    pub self_introduction: String,
}

impl From<BasicInfoRequest> for Profile {
    fn from(request: BasicInfoRequest) -> Self {
        Profile {
            student_id: request.student_id,
            faculty: request.faculty,
            last_name: request.last_name,
            first_name: request.first_name,
            nickname: request.nickname,
            self_introduction: request.self_introduction,
        }
    }
}

/// Basic info as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfoResponse {
    pub student_id: String,
    pub faculty: String,
    pub last_name: String,
    pub first_name: String,
    pub nickname: String,
    pub self_introduction: String,
}

impl From<Profile> for BasicInfoResponse {
    fn from(profile: Profile) -> Self {
        Self {
            student_id: profile.student_id,
            faculty: profile.faculty,
            last_name: profile.last_name,
            first_name: profile.first_name,
            nickname: profile.nickname,
            self_introduction: profile.self_introduction,
        }
    }
}
