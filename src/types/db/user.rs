use sea_orm::entity::prelude::*;

use super::enums::{LiveMode, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub contact_number: String,
    pub live_mode: LiveMode,
    pub role: Role,

    // Feature flags
    pub watch_live_enabled: bool,
    pub submit_feedback_enabled: bool,
    pub submit_accountability_enabled: bool,

    // Supervising INCHARGE, if any
    pub incharge_id: Option<i32>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::InchargeId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    Incharge,
    #[sea_orm(has_many = "super::accountability::Entity")]
    Accountability,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::accountability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accountability.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
