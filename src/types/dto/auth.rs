use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::dto::user::UserResponse;
use crate::types::internal::user::NewUser;
use crate::types::LiveMode;

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// Request model for self-registration
///
/// Registered accounts are always MEMBERs without a supervisor.
#[derive(Object, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Desired username, unique across all users
    pub username: String,

    /// Password, at least 6 characters
    pub password: String,

    /// Phone number
    pub contact_number: String,

    /// Preferred live broadcast format
    pub live_mode: LiveMode,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("contact_number", &self.contact_number)
            .field("live_mode", &self.live_mode)
            .finish()
    }
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        NewUser::member(req.username, req.password, req.contact_number, req.live_mode)
    }
}

/// Response model for login and registration
#[derive(Object, Debug)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// The authenticated user
    pub user: UserResponse,
}
