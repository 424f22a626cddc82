use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::errors::InternalError;
use crate::providers::access_policy::Scope;
use crate::types::db::{accountability, feedback, user};
use crate::types::internal::submission::{RecordOwner, Submission, SubmissionKind};
use crate::types::internal::user::UserSummary;

/// Storage for one kind of user-authored record
///
/// Accountability and feedback have identical shape and lifecycle; each has
/// its own table and its own implementation of this trait.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    fn kind(&self) -> SubmissionKind;

    async fn insert(&self, user_id: i32, content: String) -> Result<Submission, InternalError>;

    /// Records within `scope`, newest first
    async fn list(&self, scope: &Scope) -> Result<Vec<Submission>, InternalError>;

    /// A record together with its owner's supervision facts
    async fn find_with_owner(
        &self,
        id: i32,
    ) -> Result<Option<(Submission, RecordOwner)>, InternalError>;

    async fn delete(&self, id: i32) -> Result<(), InternalError>;
}

fn owner_of(user_id: i32, author: Option<&user::Model>) -> RecordOwner {
    RecordOwner {
        user_id,
        incharge_id: author.and_then(|u| u.incharge_id),
    }
}

// Both tables share column names, so one macro body serves both entities.
macro_rules! submission_store {
    ($store:ident, $entity:ident, $kind:expr, $label:literal) => {
        pub struct $store {
            db: DatabaseConnection,
        }

        impl $store {
            pub fn new(db: DatabaseConnection) -> Self {
                Self { db }
            }

            fn to_submission(model: $entity::Model, author: Option<&user::Model>) -> Submission {
                Submission {
                    id: model.id,
                    user_id: model.user_id,
                    content: model.content,
                    created_at: model.created_at,
                    author: author.map(UserSummary::from),
                }
            }
        }

        #[async_trait]
        impl SubmissionStore for $store {
            fn kind(&self) -> SubmissionKind {
                $kind
            }

            async fn insert(
                &self,
                user_id: i32,
                content: String,
            ) -> Result<Submission, InternalError> {
                let active = $entity::ActiveModel {
                    user_id: Set(user_id),
                    content: Set(content),
                    created_at: Set(Utc::now().timestamp()),
                    ..Default::default()
                };

                let model = active
                    .insert(&self.db)
                    .await
                    .map_err(|e| InternalError::database(concat!("insert_", $label), e))?;

                let author = user::Entity::find_by_id(user_id)
                    .one(&self.db)
                    .await
                    .map_err(|e| InternalError::database(concat!("load_", $label, "_author"), e))?;

                Ok(Self::to_submission(model, author.as_ref()))
            }

            async fn list(&self, scope: &Scope) -> Result<Vec<Submission>, InternalError> {
                let query = $entity::Entity::find().find_also_related(user::Entity);
                let query = match scope {
                    Scope::All => query,
                    Scope::SupervisedBy(incharge_id) => {
                        query.filter(user::Column::InchargeId.eq(*incharge_id))
                    }
                    Scope::OwnedBy(user_id) => {
                        query.filter($entity::Column::UserId.eq(*user_id))
                    }
                };

                let rows = query
                    .order_by_desc($entity::Column::CreatedAt)
                    .order_by_desc($entity::Column::Id)
                    .all(&self.db)
                    .await
                    .map_err(|e| InternalError::database(concat!("list_", $label), e))?;

                Ok(rows
                    .into_iter()
                    .map(|(model, author)| Self::to_submission(model, author.as_ref()))
                    .collect())
            }

            async fn find_with_owner(
                &self,
                id: i32,
            ) -> Result<Option<(Submission, RecordOwner)>, InternalError> {
                let row = $entity::Entity::find_by_id(id)
                    .find_also_related(user::Entity)
                    .one(&self.db)
                    .await
                    .map_err(|e| InternalError::database(concat!("find_", $label), e))?;

                Ok(row.map(|(model, author)| {
                    let owner = owner_of(model.user_id, author.as_ref());
                    (Self::to_submission(model, author.as_ref()), owner)
                }))
            }

            async fn delete(&self, id: i32) -> Result<(), InternalError> {
                $entity::Entity::delete_by_id(id)
                    .exec(&self.db)
                    .await
                    .map_err(|e| InternalError::database(concat!("delete_", $label), e))?;
                Ok(())
            }
        }
    };
}

submission_store!(
    AccountabilityStore,
    accountability,
    SubmissionKind::Accountability,
    "accountability"
);
submission_store!(FeedbackStore, feedback, SubmissionKind::Feedback, "feedback");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::user_store::{NewUserRecord, UserStore};
    use crate::test::utils::setup_test_db;
    use crate::types::{LiveMode, Role};

    async fn add_user(users: &UserStore, username: &str, role: Role, incharge_id: Option<i32>) -> i32 {
        users
            .insert(NewUserRecord {
                username: username.to_string(),
                password_hash: "$argon2id$stub".to_string(),
                contact_number: "+1234567890".to_string(),
                live_mode: LiveMode::Video,
                role,
                watch_live_enabled: true,
                submit_feedback_enabled: true,
                submit_accountability_enabled: true,
                incharge_id,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_insert_embeds_author() {
        let db = setup_test_db().await;
        let users = UserStore::new(db.clone());
        let store = FeedbackStore::new(db);
        let member = add_user(&users, "john_doe", Role::Member, None).await;

        let created = store.insert(member, "Great session".to_string()).await.unwrap();

        assert_eq!(created.user_id, member);
        let author = created.author.unwrap();
        assert_eq!(author.username, "john_doe");
        assert_eq!(author.role, Role::Member);
    }

    #[tokio::test]
    async fn test_list_applies_scope() {
        let db = setup_test_db().await;
        let users = UserStore::new(db.clone());
        let store = AccountabilityStore::new(db);

        let boss = add_user(&users, "jane_smith", Role::Incharge, None).await;
        let supervised = add_user(&users, "john_doe", Role::Member, Some(boss)).await;
        let other = add_user(&users, "bob_audio", Role::Member, None).await;

        store.insert(supervised, "one".to_string()).await.unwrap();
        store.insert(other, "two".to_string()).await.unwrap();
        store.insert(boss, "three".to_string()).await.unwrap();

        assert_eq!(store.list(&Scope::All).await.unwrap().len(), 3);

        let mine = store.list(&Scope::OwnedBy(other)).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].content, "two");

        let team = store.list(&Scope::SupervisedBy(boss)).await.unwrap();
        assert_eq!(team.len(), 1);
        assert_eq!(team[0].user_id, supervised);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = setup_test_db().await;
        let users = UserStore::new(db.clone());
        let store = FeedbackStore::new(db);
        let member = add_user(&users, "john_doe", Role::Member, None).await;

        let first = store.insert(member, "first".to_string()).await.unwrap();
        let second = store.insert(member, "second".to_string()).await.unwrap();

        let listed = store.list(&Scope::All).await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_find_with_owner_reports_supervisor() {
        let db = setup_test_db().await;
        let users = UserStore::new(db.clone());
        let store = FeedbackStore::new(db);
        let boss = add_user(&users, "jane_smith", Role::Incharge, None).await;
        let member = add_user(&users, "john_doe", Role::Member, Some(boss)).await;
        let created = store.insert(member, "hello".to_string()).await.unwrap();

        let (found, owner) = store.find_with_owner(created.id).await.unwrap().unwrap();
        assert_eq!(found.content, "hello");
        assert_eq!(owner, RecordOwner { user_id: member, incharge_id: Some(boss) });

        assert!(store.find_with_owner(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tables_are_independent() {
        let db = setup_test_db().await;
        let users = UserStore::new(db.clone());
        let feedback = FeedbackStore::new(db.clone());
        let accountability = AccountabilityStore::new(db);
        let member = add_user(&users, "john_doe", Role::Member, None).await;

        feedback.insert(member, "feedback".to_string()).await.unwrap();

        assert!(accountability.list(&Scope::All).await.unwrap().is_empty());
        assert_eq!(feedback.kind(), SubmissionKind::Feedback);
        assert_eq!(accountability.kind(), SubmissionKind::Accountability);
    }

    #[tokio::test]
    async fn test_deleting_user_cascades_to_records() {
        let db = setup_test_db().await;
        let users = UserStore::new(db.clone());
        let store = AccountabilityStore::new(db);
        let member = add_user(&users, "john_doe", Role::Member, None).await;
        store.insert(member, "entry".to_string()).await.unwrap();

        users.delete(member).await.unwrap();

        assert!(store.list(&Scope::All).await.unwrap().is_empty());
    }
}
