use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::providers::{CryptoProvider, TokenProvider, UserProvider};
use crate::stores::UserStore;
use crate::types::internal::auth::AccessToken;
use crate::types::internal::context::RequestContext;
use crate::types::internal::user::{NewUser, UserProfile, UserSummary};

/// Authentication coordinator that orchestrates login and registration
pub struct AuthCoordinator {
    user_store: Arc<UserStore>,
    user_provider: Arc<UserProvider>,
    crypto_provider: Arc<CryptoProvider>,
    token_provider: Arc<TokenProvider>,
}

impl AuthCoordinator {
    /// Create AuthCoordinator from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            user_provider: app_data.user_provider.clone(),
            crypto_provider: app_data.crypto_provider.clone(),
            token_provider: app_data.token_provider.clone(),
        }
    }

    /// Verify credentials and issue a token
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
    ) -> Result<(AccessToken, UserProfile), InternalError> {
        let user = match self.user_store.find_by_username(username).await? {
            Some(user) if self.crypto_provider.verify_password(password, &user.password_hash)? => {
                user
            }
            _ => {
                tracing::debug!(request_id = %ctx.request_id, "Login failed for {}", username);
                return Err(InternalError::Credential(CredentialError::InvalidCredentials));
            }
        };

        let token = self.token_provider.issue(&UserSummary::from(&user))?;
        tracing::info!(request_id = %ctx.request_id, "User {} logged in", user.id);

        let profile = self.user_provider.to_profile(user).await?;
        Ok((token, profile))
    }

    /// Self-service sign-up
    ///
    /// Always creates a MEMBER with every feature enabled and no supervisor,
    /// then logs the new account in.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        new_user: NewUser,
    ) -> Result<(AccessToken, UserProfile), InternalError> {
        UserProvider::validate_password(&new_user.password)?;

        let new_user = NewUser::member(
            new_user.username,
            new_user.password,
            new_user.contact_number,
            new_user.live_mode,
        );

        let user = self.user_provider.create_user(new_user).await?;
        let token = self.token_provider.issue(&UserSummary::from(&user))?;
        tracing::info!(request_id = %ctx.request_id, "Registered user {}", user.id);

        let profile = self.user_provider.to_profile(user).await?;
        Ok((token, profile))
    }
}
