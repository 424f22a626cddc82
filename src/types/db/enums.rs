use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Position of a user in the membership hierarchy
///
/// Persisted as its upper-case name, carried as-is in token claims and
/// in the API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    poem_openapi::Enum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Role {
    /// Unrestricted access to every user and record
    #[sea_orm(string_value = "ADMIN")]
    #[serde(rename = "ADMIN")]
    #[oai(rename = "ADMIN")]
    Admin,

    /// Supervises the members assigned to them
    #[sea_orm(string_value = "INCHARGE")]
    #[serde(rename = "INCHARGE")]
    #[oai(rename = "INCHARGE")]
    Incharge,

    /// Sees only their own records
    #[default]
    #[sea_orm(string_value = "MEMBER")]
    #[serde(rename = "MEMBER")]
    #[oai(rename = "MEMBER")]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Incharge => "INCHARGE",
            Role::Member => "MEMBER",
        }
    }

    /// ADMIN and INCHARGE may manage user accounts
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Admin | Role::Incharge)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADMIN" => Ok(Role::Admin),
            "INCHARGE" => Ok(Role::Incharge),
            "MEMBER" => Ok(Role::Member),
            other => Err(format!("Invalid role '{}'", other)),
        }
    }
}

/// Preferred format for the live broadcast
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    poem_openapi::Enum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum LiveMode {
    #[sea_orm(string_value = "audio")]
    #[serde(rename = "audio")]
    #[oai(rename = "audio")]
    Audio,

    #[sea_orm(string_value = "video")]
    #[serde(rename = "video")]
    #[oai(rename = "video")]
    Video,
}

impl LiveMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiveMode::Audio => "audio",
            LiveMode::Video => "video",
        }
    }
}

impl FromStr for LiveMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "audio" => Ok(LiveMode::Audio),
            "video" => Ok(LiveMode::Video),
            other => Err(format!("Invalid liveMode '{}'", other)),
        }
    }
}
