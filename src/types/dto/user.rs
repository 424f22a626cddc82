use poem_openapi::types::MaybeUndefined;
use poem_openapi::Object;

use crate::types::dto::common::to_rfc3339;
use crate::types::internal::roster::ImportReport;
use crate::types::internal::user::{NewUser, UserChanges, UserProfile, UserSummary};
use crate::types::{LiveMode, Role};

/// Minimal user reference embedded in other responses
#[derive(Object, Debug, Clone)]
pub struct UserSummaryResponse {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id,
            username: summary.username,
            role: summary.role,
        }
    }
}

/// A user account as returned by the API; never includes the password hash
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub contact_number: String,
    pub live_mode: LiveMode,
    pub role: Role,
    pub watch_live_enabled: bool,
    pub submit_feedback_enabled: bool,
    pub submit_accountability_enabled: bool,

    /// Supervising INCHARGE, if any
    pub incharge_id: Option<i32>,
    pub incharge: Option<UserSummaryResponse>,

    /// RFC 3339
    pub created_at: String,
    /// RFC 3339
    pub updated_at: String,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            contact_number: profile.contact_number,
            live_mode: profile.live_mode,
            role: profile.role,
            watch_live_enabled: profile.watch_live_enabled,
            submit_feedback_enabled: profile.submit_feedback_enabled,
            submit_accountability_enabled: profile.submit_accountability_enabled,
            incharge_id: profile.incharge_id,
            incharge: profile.incharge.map(UserSummaryResponse::from),
            created_at: to_rfc3339(profile.created_at),
            updated_at: to_rfc3339(profile.updated_at),
        }
    }
}

/// Request model for creating a user as ADMIN or INCHARGE
#[derive(Object)]
#[oai(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,

    /// At least 6 characters
    pub password: String,

    pub contact_number: String,
    pub live_mode: LiveMode,

    /// Defaults to MEMBER
    pub role: Option<Role>,

    /// Feature flags default to enabled
    pub watch_live_enabled: Option<bool>,
    pub submit_feedback_enabled: Option<bool>,
    pub submit_accountability_enabled: Option<bool>,

    pub incharge_id: Option<i32>,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("incharge_id", &self.incharge_id)
            .finish()
    }
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        let mut new_user =
            NewUser::member(req.username, req.password, req.contact_number, req.live_mode)
                .with_role(req.role.unwrap_or_default())
                .with_incharge(req.incharge_id);

        if let Some(enabled) = req.watch_live_enabled {
            new_user.watch_live_enabled = enabled;
        }
        if let Some(enabled) = req.submit_feedback_enabled {
            new_user.submit_feedback_enabled = enabled;
        }
        if let Some(enabled) = req.submit_accountability_enabled {
            new_user.submit_accountability_enabled = enabled;
        }
        new_user
    }
}

/// Request model for editing another user; absent fields are left unchanged
#[derive(Object, Default)]
#[oai(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// When present and non-empty, at least 6 characters; empty keeps the current password
    pub password: Option<String>,
    pub contact_number: Option<String>,
    pub live_mode: Option<LiveMode>,

    /// ADMIN only
    pub role: Option<Role>,

    pub watch_live_enabled: Option<bool>,
    pub submit_feedback_enabled: Option<bool>,
    pub submit_accountability_enabled: Option<bool>,

    /// `null` removes the supervisor
    pub incharge_id: MaybeUndefined<i32>,
}

impl std::fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .field("incharge_id", &self.incharge_id)
            .finish()
    }
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        let incharge_id = match req.incharge_id {
            MaybeUndefined::Undefined => None,
            MaybeUndefined::Null => Some(None),
            MaybeUndefined::Value(id) => Some(Some(id)),
        };

        UserChanges {
            password: req.password,
            contact_number: req.contact_number,
            live_mode: req.live_mode,
            role: req.role,
            watch_live_enabled: req.watch_live_enabled,
            submit_feedback_enabled: req.submit_feedback_enabled,
            submit_accountability_enabled: req.submit_accountability_enabled,
            incharge_id,
        }
    }
}

/// Request model for editing one's own profile
#[derive(Object)]
#[oai(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// When present and non-empty, at least 6 characters; empty keeps the current password
    pub password: Option<String>,
    pub contact_number: Option<String>,
    pub live_mode: Option<LiveMode>,
}

impl std::fmt::Debug for UpdateProfileRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateProfileRequest")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("contact_number", &self.contact_number)
            .field("live_mode", &self.live_mode)
            .finish()
    }
}

impl From<UpdateProfileRequest> for UserChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        UserChanges::profile(req.password, req.contact_number, req.live_mode)
    }
}

/// Result of a CSV roster import
#[derive(Object, Debug)]
pub struct ImportResponse {
    /// Number of users created
    pub imported: u32,

    /// One entry per rejected line, prefixed with its line number
    pub errors: Vec<String>,
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        Self {
            imported: report.imported,
            errors: report.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let absent: UserChanges = UpdateUserRequest::default().into();
        assert_eq!(absent.incharge_id, None);

        let cleared: UserChanges = UpdateUserRequest {
            incharge_id: MaybeUndefined::Null,
            ..Default::default()
        }
        .into();
        assert_eq!(cleared.incharge_id, Some(None));

        let assigned: UserChanges = UpdateUserRequest {
            incharge_id: MaybeUndefined::Value(7),
            ..Default::default()
        }
        .into();
        assert_eq!(assigned.incharge_id, Some(Some(7)));
    }

    #[test]
    fn test_create_request_defaults() {
        let new_user: NewUser = CreateUserRequest {
            username: "john_doe".to_string(),
            password: "password123".to_string(),
            contact_number: "+1234567891".to_string(),
            live_mode: LiveMode::Audio,
            role: None,
            watch_live_enabled: None,
            submit_feedback_enabled: Some(false),
            submit_accountability_enabled: None,
            incharge_id: None,
        }
        .into();

        assert_eq!(new_user.role, Role::Member);
        assert!(new_user.watch_live_enabled);
        assert!(!new_user.submit_feedback_enabled);
        assert!(new_user.submit_accountability_enabled);
    }
}
