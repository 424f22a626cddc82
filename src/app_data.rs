use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{BootstrapSettings, ConfigError, EnvironmentProvider, SecretManager};
use crate::providers::{CryptoProvider, TokenProvider, UserProvider};
use crate::stores::{AccountabilityStore, FeedbackStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(db, env_provider)
///   ↓ creates once
///   ├─ settings / secret_manager
///   ├─ user_store, accountability_store, feedback_store
///   └─ crypto_provider, token_provider, user_provider
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   ├─ AuthCoordinator::new(app_data)
///   ├─ UserCoordinator::new(app_data)
///   ├─ RosterCoordinator::new(app_data)
///   └─ SubmissionCoordinator::accountability(app_data) / ::feedback(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub env_provider: Arc<dyn EnvironmentProvider>,
    pub settings: Arc<BootstrapSettings>,
    pub secret_manager: Arc<SecretManager>,
    pub user_store: Arc<UserStore>,
    pub accountability_store: Arc<AccountabilityStore>,
    pub feedback_store: Arc<FeedbackStore>,
    pub crypto_provider: Arc<CryptoProvider>,
    pub token_provider: Arc<TokenProvider>,
    pub user_provider: Arc<UserProvider>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a setting or secret is missing or invalid
    pub fn init(
        db: DatabaseConnection,
        env_provider: Arc<dyn EnvironmentProvider>,
    ) -> Result<Self, ConfigError> {
        tracing::info!("Initializing AppData...");

        let settings = Arc::new(BootstrapSettings::from_env_provider(env_provider.as_ref())?);

        tracing::debug!("Initializing secret manager...");
        let secret_manager = Arc::new(SecretManager::init_with(env_provider.as_ref())?);
        tracing::debug!("Secret manager initialized");

        let user_store = Arc::new(UserStore::new(db.clone()));
        let accountability_store = Arc::new(AccountabilityStore::new(db.clone()));
        let feedback_store = Arc::new(FeedbackStore::new(db.clone()));
        tracing::debug!("Stores created");

        let crypto_provider = Arc::new(CryptoProvider::new(secret_manager.clone()));
        let token_provider = Arc::new(TokenProvider::new(
            secret_manager.clone(),
            settings.jwt_expiration_minutes(),
        ));
        let user_provider = Arc::new(UserProvider::new(
            user_store.clone(),
            crypto_provider.clone(),
        ));

        tracing::info!("AppData initialization complete");

        Ok(Self {
            db,
            env_provider,
            settings,
            secret_manager,
            user_store,
            accountability_store,
            feedback_store,
            crypto_provider,
            token_provider,
            user_provider,
        })
    }
}
