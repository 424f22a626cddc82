// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ephrathah_backend::config::EnvironmentProvider;
use ephrathah_backend::types::db::user;
use ephrathah_backend::types::internal::user::NewUser;
use ephrathah_backend::types::{LiveMode, Role};
use ephrathah_backend::AppData;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

pub const TEST_PASSWORD: &str = "password123";

/// In-memory environment so tests never depend on process-global variables
#[derive(Default)]
pub struct TestEnvironment {
    vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn with_test_secrets() -> Self {
        Self::default()
            .with_var("JWT_SECRET", "integration-test-jwt-secret-at-least-32-chars")
            .with_var("PASSWORD_PEPPER", "integration-pepper-16")
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvironmentProvider for TestEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Fully wired application over a fresh in-memory database
pub async fn setup_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    let env = Arc::new(TestEnvironment::with_test_secrets());

    Arc::new(AppData::init(db, env).expect("Failed to initialize AppData"))
}

/// Insert a user with `TEST_PASSWORD`
pub async fn create_user(
    app_data: &AppData,
    username: &str,
    role: Role,
    incharge_id: Option<i32>,
) -> user::Model {
    app_data
        .user_provider
        .create_user(
            NewUser::member(username, TEST_PASSWORD, "+1234567890", LiveMode::Video)
                .with_role(role)
                .with_incharge(incharge_id),
        )
        .await
        .expect("Failed to create user")
}

/// Helper to manage environment variables in tests
///
/// Cleans up specified environment variables on creation and drop,
/// ensuring test isolation when dealing with global environment state.
pub struct EnvGuard {
    vars: Vec<String>,
}

impl EnvGuard {
    pub fn new(vars: Vec<&str>) -> Self {
        for var in &vars {
            std::env::remove_var(var);
        }
        Self {
            vars: vars.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in &self.vars {
            std::env::remove_var(var);
        }
    }
}

/// Global mutex for tests that modify environment variables
///
/// Environment variables are process-global, so tests that modify them
/// must run serially to avoid race conditions.
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());
