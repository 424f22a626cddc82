use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::internal::UserError;
use crate::errors::InternalError;
use crate::providers::CryptoProvider;
use crate::stores::{NewUserRecord, UserRecordChanges, UserStore};
use crate::types::db::user;
use crate::types::internal::user::{NewUser, UserChanges, UserProfile};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Account operations shared by registration, user management, CSV import
/// and seeding
pub struct UserProvider {
    user_store: Arc<UserStore>,
    crypto_provider: Arc<CryptoProvider>,
}

impl UserProvider {
    pub fn new(user_store: Arc<UserStore>, crypto_provider: Arc<CryptoProvider>) -> Self {
        Self {
            user_store,
            crypto_provider,
        }
    }

    /// Password policy for passwords chosen through the API
    pub fn validate_password(password: &str) -> Result<(), InternalError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(InternalError::validation(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            ));
        }
        Ok(())
    }

    fn validate_new_user(new_user: &NewUser) -> Result<(), InternalError> {
        if new_user.username.trim().is_empty() {
            return Err(InternalError::validation("username", "Username is required"));
        }
        if new_user.password.is_empty() {
            return Err(InternalError::validation("password", "Password is required"));
        }
        if new_user.contact_number.trim().is_empty() {
            return Err(InternalError::validation(
                "contactNumber",
                "Contact number is required",
            ));
        }
        Ok(())
    }

    async fn ensure_incharge_exists(&self, incharge_id: Option<i32>) -> Result<(), InternalError> {
        // Only existence is checked; the referenced user's role is not
        if let Some(incharge_id) = incharge_id {
            if self.user_store.find_by_id(incharge_id).await?.is_none() {
                return Err(InternalError::User(UserError::UnknownIncharge { incharge_id }));
            }
        }
        Ok(())
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, InternalError> {
        self.user_store.username_exists(username).await
    }

    /// Hash the password and insert the account
    pub async fn create_user(&self, new_user: NewUser) -> Result<user::Model, InternalError> {
        Self::validate_new_user(&new_user)?;

        if self.user_store.username_exists(&new_user.username).await? {
            return Err(InternalError::User(UserError::DuplicateUsername {
                username: new_user.username,
            }));
        }
        self.ensure_incharge_exists(new_user.incharge_id).await?;

        let password_hash = self.crypto_provider.hash_password(&new_user.password)?;

        let created = self
            .user_store
            .insert(NewUserRecord {
                username: new_user.username,
                password_hash,
                contact_number: new_user.contact_number,
                live_mode: new_user.live_mode,
                role: new_user.role,
                watch_live_enabled: new_user.watch_live_enabled,
                submit_feedback_enabled: new_user.submit_feedback_enabled,
                submit_accountability_enabled: new_user.submit_accountability_enabled,
                incharge_id: new_user.incharge_id,
            })
            .await?;

        tracing::debug!("Created user {} ({})", created.id, created.role.as_str());
        Ok(created)
    }

    /// Apply a partial update
    ///
    /// An empty password leaves the stored hash unchanged.
    pub async fn update_user(
        &self,
        id: i32,
        changes: UserChanges,
    ) -> Result<user::Model, InternalError> {
        if let Some(Some(incharge_id)) = changes.incharge_id {
            self.ensure_incharge_exists(Some(incharge_id)).await?;
        }

        let password_hash = match changes.password.as_deref() {
            Some(password) if !password.is_empty() => {
                Some(self.crypto_provider.hash_password(password)?)
            }
            _ => None,
        };

        self.user_store
            .update(
                id,
                UserRecordChanges {
                    password_hash,
                    contact_number: changes.contact_number,
                    live_mode: changes.live_mode,
                    role: changes.role,
                    watch_live_enabled: changes.watch_live_enabled,
                    submit_feedback_enabled: changes.submit_feedback_enabled,
                    submit_accountability_enabled: changes.submit_accountability_enabled,
                    incharge_id: changes.incharge_id,
                },
            )
            .await
    }

    /// Attach supervisor summaries, one query for the whole batch
    pub async fn to_profiles(
        &self,
        users: Vec<user::Model>,
    ) -> Result<Vec<UserProfile>, InternalError> {
        let mut incharge_ids: Vec<i32> = users.iter().filter_map(|u| u.incharge_id).collect();
        incharge_ids.sort_unstable();
        incharge_ids.dedup();

        let summaries: HashMap<i32, _> = self
            .user_store
            .find_summaries(&incharge_ids)
            .await?
            .into_iter()
            .map(|summary| (summary.id, summary))
            .collect();

        Ok(users
            .into_iter()
            .map(|u| {
                let incharge = u.incharge_id.and_then(|id| summaries.get(&id).cloned());
                UserProfile::from_model(u, incharge)
            })
            .collect())
    }

    pub async fn to_profile(&self, user: user::Model) -> Result<UserProfile, InternalError> {
        let mut profiles = self.to_profiles(vec![user]).await?;
        profiles
            .pop()
            .ok_or_else(|| InternalError::parse("user_profile", "profile batch was empty"))
    }

    pub async fn load_profile(&self, id: i32) -> Result<UserProfile, InternalError> {
        let user = self.user_store.get_by_id(id).await?;
        self.to_profile(user).await
    }
}
