use std::fmt;

use crate::config::errors::ConfigError;
use crate::config::EnvironmentProvider;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://membership.db?mode=rwc";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_JWT_EXPIRATION_MINUTES: i64 = 1440;

/// Bootstrap settings for infrastructure configuration
///
/// Each value comes from its environment variable, falling back to a default.
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    jwt_expiration_minutes: i64,
}

impl BootstrapSettings {
    /// Load bootstrap settings through the given environment provider
    pub fn from_env_provider(env_provider: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let database_url = env_provider.get_var_or("DATABASE_URL", DEFAULT_DATABASE_URL);
        if database_url.trim().is_empty() {
            return Err(ConfigError::invalid_setting("DATABASE_URL", "cannot be empty"));
        }

        let server_host = env_provider.get_var_or("HOST", DEFAULT_HOST);
        if server_host.trim().is_empty() {
            return Err(ConfigError::invalid_setting("HOST", "Host address cannot be empty"));
        }

        let port_value = env_provider.get_var_or("PORT", &DEFAULT_PORT.to_string());
        let server_port = Self::parse_port(&port_value)?;

        let minutes_value = env_provider.get_var_or(
            "JWT_EXPIRATION_MINUTES",
            &DEFAULT_JWT_EXPIRATION_MINUTES.to_string(),
        );
        let jwt_expiration_minutes = match minutes_value.trim().parse::<i64>() {
            Ok(minutes) if minutes > 0 => minutes,
            _ => {
                return Err(ConfigError::invalid_setting(
                    "JWT_EXPIRATION_MINUTES",
                    format!("Expected a positive number of minutes, got '{}'", minutes_value),
                ))
            }
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            jwt_expiration_minutes,
        })
    }

    fn parse_port(value: &str) -> Result<u16, ConfigError> {
        match value.trim().parse::<u16>() {
            Ok(0) => Err(ConfigError::invalid_setting(
                "PORT",
                "Port 0 is outside valid range 1-65535",
            )),
            Ok(port) => Ok(port),
            Err(_) => Err(ConfigError::invalid_setting(
                "PORT",
                format!("Expected port number between 1 and 65535, got '{}'", value),
            )),
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn jwt_expiration_minutes(&self) -> i64 {
        self.jwt_expiration_minutes
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .finish()
    }
}
