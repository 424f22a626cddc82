use std::fmt;

use crate::config::{EnvironmentProvider, SecretConfig, SecretType, SystemEnvironment};

/// Custom error type for secret-related failures
#[derive(Debug)]
pub enum SecretError {
    Missing { secret_name: String },
    InvalidLength { secret_name: String, expected: usize, actual: usize },
}

impl SecretError {
    pub fn missing(secret_name: &str) -> Self {
        Self::Missing {
            secret_name: secret_name.to_string(),
        }
    }

    pub fn invalid_length(secret_name: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            secret_name: secret_name.to_string(),
            expected,
            actual,
        }
    }
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { secret_name } => {
                write!(f, "Required secret '{}' is missing", secret_name)
            }
            Self::InvalidLength { secret_name, expected, actual } => {
                write!(
                    f,
                    "Secret '{}' must be at least {} characters, got {}",
                    secret_name, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for SecretError {}

/// Centralized manager for application secrets
pub struct SecretManager {
    jwt_secret: String,
    password_pepper: String,
}

impl SecretManager {
    /// Load secrets from the process environment
    pub fn init() -> Result<Self, SecretError> {
        Self::init_with(&SystemEnvironment)
    }

    /// Load and validate all secrets through the given provider
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or too short
    pub fn init_with(env_provider: &dyn EnvironmentProvider) -> Result<Self, SecretError> {
        let jwt_secret = Self::load_secret(env_provider, &Self::jwt_config())?;
        let password_pepper = Self::load_secret(env_provider, &Self::pepper_config())?;

        Ok(Self {
            jwt_secret,
            password_pepper,
        })
    }

    /// Configuration for JWT secret
    fn jwt_config() -> SecretConfig {
        SecretConfig::new(SecretType::EnvVar {
            name: "JWT_SECRET".to_string(),
        })
        .required(true)
        .min_length(32)
    }

    /// Configuration for pepper
    fn pepper_config() -> SecretConfig {
        SecretConfig::new(SecretType::EnvVar {
            name: "PASSWORD_PEPPER".to_string(),
        })
        .required(true)
        .min_length(16)
    }

    /// Get the JWT signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Get the pepper for password hashing
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    /// Load a secret based on its configuration
    pub(crate) fn load_secret(
        env_provider: &dyn EnvironmentProvider,
        config: &SecretConfig,
    ) -> Result<String, SecretError> {
        let value = match &config.secret_type {
            SecretType::EnvVar { name } => match env_provider.get_var(name) {
                Some(v) => v,
                None if !config.required => return Ok(String::new()),
                None => return Err(SecretError::missing(name)),
            },
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(SecretError::invalid_length(
                    config.secret_type.name(),
                    min_len,
                    value.len(),
                ));
            }
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 2 }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    const JWT: &str = "this-is-a-valid-jwt-secret-with-32-characters";
    const PEPPER: &str = "valid-pepper-16ch";

    #[test]
    fn test_successful_initialization_with_valid_secrets() {
        let env = MockEnvironment::empty()
            .with_var("JWT_SECRET", JWT)
            .with_var("PASSWORD_PEPPER", PEPPER);

        let manager = SecretManager::init_with(&env).unwrap();
        assert_eq!(manager.jwt_secret(), JWT);
        assert_eq!(manager.password_pepper(), PEPPER);
    }

    #[test]
    fn test_error_when_jwt_secret_missing() {
        let env = MockEnvironment::empty().with_var("PASSWORD_PEPPER", PEPPER);

        match SecretManager::init_with(&env).unwrap_err() {
            SecretError::Missing { secret_name } => assert_eq!(secret_name, "JWT_SECRET"),
            other => panic!("Expected Missing error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_when_pepper_missing() {
        let env = MockEnvironment::empty().with_var("JWT_SECRET", JWT);

        match SecretManager::init_with(&env).unwrap_err() {
            SecretError::Missing { secret_name } => assert_eq!(secret_name, "PASSWORD_PEPPER"),
            other => panic!("Expected Missing error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_when_jwt_secret_too_short() {
        let env = MockEnvironment::empty()
            .with_var("JWT_SECRET", "short-secret")
            .with_var("PASSWORD_PEPPER", PEPPER);

        match SecretManager::init_with(&env).unwrap_err() {
            SecretError::InvalidLength { secret_name, expected, actual } => {
                assert_eq!(secret_name, "JWT_SECRET");
                assert_eq!(expected, 32);
                assert_eq!(actual, 12);
            }
            other => panic!("Expected InvalidLength error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_when_pepper_too_short() {
        let env = MockEnvironment::empty()
            .with_var("JWT_SECRET", JWT)
            .with_var("PASSWORD_PEPPER", "short");

        match SecretManager::init_with(&env).unwrap_err() {
            SecretError::InvalidLength { secret_name, expected, actual } => {
                assert_eq!(secret_name, "PASSWORD_PEPPER");
                assert_eq!(expected, 16);
                assert_eq!(actual, 5);
            }
            other => panic!("Expected InvalidLength error, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_and_display_do_not_expose_secrets() {
        let env = MockEnvironment::empty()
            .with_var("JWT_SECRET", JWT)
            .with_var("PASSWORD_PEPPER", PEPPER);
        let manager = SecretManager::init_with(&env).unwrap();

        let debug_output = format!("{:?}", manager);
        assert!(debug_output.contains("<redacted>"));
        assert!(!debug_output.contains(JWT));
        assert!(!debug_output.contains(PEPPER));

        let display_output = format!("{}", manager);
        assert!(display_output.contains("secrets_loaded: 2"));
        assert!(!display_output.contains(JWT));
    }

    #[test]
    fn test_optional_secret_may_be_absent() {
        let config = SecretConfig::new(SecretType::EnvVar {
            name: "OPTIONAL_SECRET".to_string(),
        })
        .required(false);

        let value = SecretManager::load_secret(&MockEnvironment::empty(), &config).unwrap();
        assert!(value.is_empty());
    }
}
