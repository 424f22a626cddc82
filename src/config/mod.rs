mod bootstrap_settings;
mod database;
mod env_provider;
mod errors;
mod logging;
mod secret_config;
mod secret_manager;

pub use bootstrap_settings::BootstrapSettings;
pub use database::{connect_database, migrate_database};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
pub use errors::ConfigError;
pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use secret_config::{SecretConfig, SecretType};
pub use secret_manager::{SecretError, SecretManager};
