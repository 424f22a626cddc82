use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::errors::internal::UserError;
use crate::errors::InternalError;
use crate::providers::access_policy::Scope;
use crate::types::db::user;
use crate::types::internal::user::UserSummary;
use crate::types::{LiveMode, Role};

/// Row to insert; the password is already hashed
#[derive(Clone)]
pub struct NewUserRecord {
    pub username: String,
    pub password_hash: String,
    pub contact_number: String,
    pub live_mode: LiveMode,
    pub role: Role,
    pub watch_live_enabled: bool,
    pub submit_feedback_enabled: bool,
    pub submit_accountability_enabled: bool,
    pub incharge_id: Option<i32>,
}

/// Column updates; `None` leaves a column unchanged
#[derive(Clone, Default)]
pub struct UserRecordChanges {
    pub password_hash: Option<String>,
    pub contact_number: Option<String>,
    pub live_mode: Option<LiveMode>,
    pub role: Option<Role>,
    pub watch_live_enabled: Option<bool>,
    pub submit_feedback_enabled: Option<bool>,
    pub submit_accountability_enabled: Option<bool>,
    pub incharge_id: Option<Option<i32>>,
}

/// Data access for the users table
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    /// Like `find_by_id` but a missing row is an error
    pub async fn get_by_id(&self, id: i32) -> Result<user::Model, InternalError> {
        self.find_by_id(id)
            .await?
            .ok_or(InternalError::User(UserError::UserIdNotFound { user_id: id }))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, InternalError> {
        let count = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("username_exists", e))?;
        Ok(count > 0)
    }

    /// Users within `scope`, ordered by username
    pub async fn list(&self, scope: &Scope) -> Result<Vec<user::Model>, InternalError> {
        let query = match scope {
            Scope::All => user::Entity::find(),
            Scope::SupervisedBy(incharge_id) => {
                user::Entity::find().filter(user::Column::InchargeId.eq(*incharge_id))
            }
            Scope::OwnedBy(user_id) => user::Entity::find().filter(user::Column::Id.eq(*user_id)),
        };

        query
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// Id, username and role for each of `ids` that exists
    pub async fn find_summaries(&self, ids: &[i32]) -> Result<Vec<UserSummary>, InternalError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        user::Entity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .select_only()
            .column(user::Column::Id)
            .column(user::Column::Username)
            .column(user::Column::Role)
            .into_model::<UserSummary>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_summaries", e))
    }

    /// Insert a user
    ///
    /// A unique-index collision on username becomes `DuplicateUsername`, which
    /// also covers a concurrent insert racing an earlier existence check.
    pub async fn insert(&self, record: NewUserRecord) -> Result<user::Model, InternalError> {
        let now = Utc::now().timestamp();
        let username = record.username.clone();

        let new_user = user::ActiveModel {
            username: Set(record.username),
            password_hash: Set(record.password_hash),
            contact_number: Set(record.contact_number),
            live_mode: Set(record.live_mode),
            role: Set(record.role),
            watch_live_enabled: Set(record.watch_live_enabled),
            submit_feedback_enabled: Set(record.submit_feedback_enabled),
            submit_accountability_enabled: Set(record.submit_accountability_enabled),
            incharge_id: Set(record.incharge_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        new_user.insert(&self.db).await.map_err(|e| {
            let err = InternalError::database("insert_user", e);
            if err.is_unique_violation() {
                InternalError::User(UserError::DuplicateUsername { username })
            } else {
                err
            }
        })
    }

    async fn get_in<C: ConnectionTrait>(conn: &C, id: i32) -> Result<user::Model, InternalError> {
        user::Entity::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))?
            .ok_or(InternalError::User(UserError::UserIdNotFound { user_id: id }))
    }

    /// Apply `changes` to an existing row in one transaction
    pub async fn update(
        &self,
        id: i32,
        changes: UserRecordChanges,
    ) -> Result<user::Model, InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let existing = Self::get_in(&txn, id).await?;
        let mut active: user::ActiveModel = existing.into();

        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(contact_number) = changes.contact_number {
            active.contact_number = Set(contact_number);
        }
        if let Some(live_mode) = changes.live_mode {
            active.live_mode = Set(live_mode);
        }
        if let Some(role) = changes.role {
            active.role = Set(role);
        }
        if let Some(enabled) = changes.watch_live_enabled {
            active.watch_live_enabled = Set(enabled);
        }
        if let Some(enabled) = changes.submit_feedback_enabled {
            active.submit_feedback_enabled = Set(enabled);
        }
        if let Some(enabled) = changes.submit_accountability_enabled {
            active.submit_accountability_enabled = Set(enabled);
        }
        if let Some(incharge_id) = changes.incharge_id {
            active.incharge_id = Set(incharge_id);
        }
        active.updated_at = Set(Utc::now().timestamp());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| InternalError::database("update_user", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;
        Ok(updated)
    }

    /// Delete a user, returning the removed row
    ///
    /// Their submissions go with them; supervised users lose their incharge.
    pub async fn delete(&self, id: i32) -> Result<user::Model, InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let existing = Self::get_in(&txn, id).await?;
        user::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;
        Ok(existing)
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        user::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_users", e))
    }
}
