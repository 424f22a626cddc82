use sea_orm::FromQueryResult;

use crate::types::db::user;
use crate::types::{LiveMode, Role};

/// Minimal view of a user embedded in other projections
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl From<&user::Model> for UserSummary {
    fn from(u: &user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            role: u.role,
        }
    }
}

/// A user without credentials, with the supervising INCHARGE resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub contact_number: String,
    pub live_mode: LiveMode,
    pub role: Role,
    pub watch_live_enabled: bool,
    pub submit_feedback_enabled: bool,
    pub submit_accountability_enabled: bool,
    pub incharge_id: Option<i32>,
    pub incharge: Option<UserSummary>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl UserProfile {
    pub fn from_model(u: user::Model, incharge: Option<UserSummary>) -> Self {
        Self {
            id: u.id,
            username: u.username,
            contact_number: u.contact_number,
            live_mode: u.live_mode,
            role: u.role,
            watch_live_enabled: u.watch_live_enabled,
            submit_feedback_enabled: u.submit_feedback_enabled,
            submit_accountability_enabled: u.submit_accountability_enabled,
            incharge_id: u.incharge_id,
            incharge,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Input for creating an account; `password` is plaintext until hashed
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub contact_number: String,
    pub live_mode: LiveMode,
    pub role: Role,
    pub watch_live_enabled: bool,
    pub submit_feedback_enabled: bool,
    pub submit_accountability_enabled: bool,
    pub incharge_id: Option<i32>,
}

impl NewUser {
    /// A MEMBER with every feature enabled and no supervisor
    pub fn member(
        username: impl Into<String>,
        password: impl Into<String>,
        contact_number: impl Into<String>,
        live_mode: LiveMode,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            contact_number: contact_number.into(),
            live_mode,
            role: Role::Member,
            watch_live_enabled: true,
            submit_feedback_enabled: true,
            submit_accountability_enabled: true,
            incharge_id: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_incharge(mut self, incharge_id: Option<i32>) -> Self {
        self.incharge_id = incharge_id;
        self
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("contact_number", &self.contact_number)
            .field("live_mode", &self.live_mode)
            .field("role", &self.role)
            .field("incharge_id", &self.incharge_id)
            .finish()
    }
}

/// Partial update of a user; `None` leaves a field untouched
///
/// `incharge_id` is doubly optional: `Some(None)` clears the supervisor.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub password: Option<String>,
    pub contact_number: Option<String>,
    pub live_mode: Option<LiveMode>,
    pub role: Option<Role>,
    pub watch_live_enabled: Option<bool>,
    pub submit_feedback_enabled: Option<bool>,
    pub submit_accountability_enabled: Option<bool>,
    pub incharge_id: Option<Option<i32>>,
}

impl UserChanges {
    /// The subset a user may change on their own profile
    pub fn profile(
        password: Option<String>,
        contact_number: Option<String>,
        live_mode: Option<LiveMode>,
    ) -> Self {
        Self {
            password,
            contact_number,
            live_mode,
            ..Default::default()
        }
    }
}

impl std::fmt::Debug for UserChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserChanges")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("contact_number", &self.contact_number)
            .field("live_mode", &self.live_mode)
            .field("role", &self.role)
            .field("watch_live_enabled", &self.watch_live_enabled)
            .field("submit_feedback_enabled", &self.submit_feedback_enabled)
            .field("submit_accountability_enabled", &self.submit_accountability_enabled)
            .field("incharge_id", &self.incharge_id)
            .finish()
    }
}
