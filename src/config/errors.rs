use thiserror::Error;

use super::logging::LoggingError;
use super::secret_manager::SecretError;

/// Startup configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid setting '{setting_name}': {reason}")]
    InvalidSetting {
        setting_name: String,
        reason: String,
    },

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

impl ConfigError {
    pub fn invalid_setting(setting_name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.to_string(),
            reason: reason.into(),
        }
    }
}
