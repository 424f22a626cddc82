// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem_openapi::auth::Bearer;
use sea_orm::{Database, DatabaseConnection};

use crate::api::BearerAuth;
use crate::app_data::AppData;
use crate::config::MockEnvironment;
use crate::types::db::user;
use crate::types::internal::auth::Requester;
use crate::types::internal::context::RequestContext;
use crate::types::internal::user::{NewUser, UserSummary};
use crate::types::{LiveMode, Role};

/// Password given to every user created by `seed_user`
pub const TEST_PASSWORD: &str = "password123";

/// Fresh in-memory database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Fully wired AppData over an in-memory database and test secrets
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    let env = Arc::new(MockEnvironment::with_test_secrets().with_var("JWT_EXPIRATION_MINUTES", "60"));

    Arc::new(AppData::init(db, env).expect("Failed to initialize test AppData"))
}

/// Insert a user with the given role and supervisor
pub async fn seed_user(
    app_data: &AppData,
    username: &str,
    role: Role,
    incharge_id: Option<i32>,
) -> user::Model {
    app_data
        .user_provider
        .create_user(
            NewUser::member(username, TEST_PASSWORD, "+1234567890", LiveMode::Audio)
                .with_role(role)
                .with_incharge(incharge_id),
        )
        .await
        .expect("Failed to seed user")
}

/// API-sourced context acting as `user`
pub fn ctx_for(user: &user::Model) -> RequestContext {
    let req = poem::Request::builder().finish();
    RequestContext::anonymous(&req).with_requester(Requester::from(user))
}

/// Bearer credential carrying a freshly issued token for `user`
pub fn bearer_for(app_data: &AppData, user: &user::Model) -> BearerAuth {
    let token = app_data
        .token_provider
        .issue(&UserSummary::from(user))
        .expect("Failed to issue test token");

    BearerAuth(Bearer {
        token: token.into_string(),
    })
}
