use serde::{Deserialize, Serialize};

use crate::types::db::user;
use crate::types::Role;

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: i32,

    /// Username at the time the token was issued
    pub username: String,

    /// Role at the time the token was issued
    pub role: Role,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Identity of the caller for a single request
///
/// Derived from validated token claims; never loaded from shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl Requester {
    pub fn new(id: i32, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }
}

impl From<&Claims> for Requester {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username.clone(),
            role: claims.role,
        }
    }
}

impl From<&user::Model> for Requester {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// Signed bearer token
///
/// `Display` is redacted so the token never lands in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T> From<T> for AccessToken
where
    T: AsRef<str>,
{
    fn from(value: T) -> Self {
        Self(value.as_ref().to_owned())
    }
}

impl std::fmt::Display for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[access_token]")
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([redacted])")
    }
}
