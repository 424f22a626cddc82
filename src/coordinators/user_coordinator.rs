use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::access_policy;
use crate::providers::UserProvider;
use crate::stores::UserStore;
use crate::types::internal::context::RequestContext;
use crate::types::internal::user::{NewUser, UserChanges, UserProfile};

/// Orchestrates account management: own profile, listing, create, edit, delete
pub struct UserCoordinator {
    user_store: Arc<UserStore>,
    user_provider: Arc<UserProvider>,
}

impl UserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            user_provider: app_data.user_provider.clone(),
        }
    }

    /// An empty password means "keep the current one" and is not validated
    fn validate_password_change(changes: &UserChanges) -> Result<(), InternalError> {
        match changes.password.as_deref() {
            Some(password) if !password.is_empty() => UserProvider::validate_password(password),
            _ => Ok(()),
        }
    }

    /// The caller's own account
    pub async fn profile(&self, ctx: &RequestContext) -> Result<UserProfile, InternalError> {
        let requester = ctx.requester()?;
        self.user_provider.load_profile(requester.id).await
    }

    /// Update the caller's own password, contact number or live mode
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        changes: UserChanges,
    ) -> Result<UserProfile, InternalError> {
        let requester = ctx.requester()?;
        let changes = UserChanges::profile(changes.password, changes.contact_number, changes.live_mode);
        Self::validate_password_change(&changes)?;

        let updated = self.user_provider.update_user(requester.id, changes).await?;
        tracing::info!(request_id = %ctx.request_id, "User {} updated their profile", requester.id);

        self.user_provider.to_profile(updated).await
    }

    /// All users for ADMIN, supervised users for INCHARGE
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<UserProfile>, InternalError> {
        let requester = ctx.requester()?;
        let scope = access_policy::user_list_scope(requester)?;

        let users = self.user_store.list(&scope).await?;
        self.user_provider.to_profiles(users).await
    }

    /// Any single user; managers only, not limited to supervised users
    pub async fn get(&self, ctx: &RequestContext, id: i32) -> Result<UserProfile, InternalError> {
        let requester = ctx.requester()?;
        access_policy::require_user_manager(requester)?;

        self.user_provider.load_profile(id).await
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        new_user: NewUser,
    ) -> Result<UserProfile, InternalError> {
        let requester = ctx.requester()?;
        access_policy::authorize_user_create(requester, new_user.role)?;
        UserProvider::validate_password(&new_user.password)?;

        let created = self.user_provider.create_user(new_user).await?;
        tracing::info!(
            request_id = %ctx.request_id,
            "User {} created {} user {}",
            requester.id,
            created.role.as_str(),
            created.id
        );

        self.user_provider.to_profile(created).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i32,
        changes: UserChanges,
    ) -> Result<UserProfile, InternalError> {
        let requester = ctx.requester()?;
        access_policy::reject_member_edit(requester)?;

        let target = self.user_store.get_by_id(id).await?;
        access_policy::authorize_user_edit(requester, target.role, changes.role.is_some())?;
        Self::validate_password_change(&changes)?;

        let updated = self.user_provider.update_user(id, changes).await?;
        tracing::info!(request_id = %ctx.request_id, "User {} updated user {}", requester.id, id);

        self.user_provider.to_profile(updated).await
    }

    /// Delete a user and everything they submitted
    pub async fn delete(&self, ctx: &RequestContext, id: i32) -> Result<UserProfile, InternalError> {
        let requester = ctx.requester()?;
        access_policy::require_user_manager(requester)?;

        let target = self.user_store.get_by_id(id).await?;
        access_policy::authorize_user_delete(requester, target.role)?;

        let removed = self.user_store.delete(id).await?;
        tracing::info!(request_id = %ctx.request_id, "User {} deleted user {}", requester.id, id);

        self.user_provider.to_profile(removed).await
    }
}
