//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use super::user_profile::UserProfile;

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,

    /// The authenticated account
    pub user: UserProfile,
}

impl AuthResponse {
    pub fn new(access_token: String, expires_in: i64, user: UserProfile) -> Self {
        Self {
            access_token,
            expires_in,
            user,
        }
    }
}
