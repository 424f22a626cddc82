#[cfg(test)]
use std::collections::HashMap;

/// Trait for providing environment variable access
///
/// Settings and secrets are read through this trait so tests can supply
/// values without mutating the process environment.
pub trait EnvironmentProvider: Send + Sync {
    fn get_var(&self, key: &str) -> Option<String>;

    /// Value of `key`, or `default` when unset
    fn get_var_or(&self, key: &str, default: &str) -> String {
        self.get_var(key).unwrap_or_else(|| default.to_string())
    }
}

/// Production environment provider that reads from system environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Test environment provider with configurable variables
#[cfg(test)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn empty() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    /// Secrets long enough to pass validation
    pub fn with_test_secrets() -> Self {
        Self::empty()
            .with_var("JWT_SECRET", "test-secret-key-minimum-32-characters-long")
            .with_var("PASSWORD_PEPPER", "test-pepper-for-unit-tests")
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_vars(mut self, vars: &[(&str, &str)]) -> Self {
        for (key, value) in vars {
            self.vars.insert(key.to_string(), value.to_string());
        }
        self
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
