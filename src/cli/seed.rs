// Seed command implementation
// Creates the demo accounts used for local development

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::types::internal::user::NewUser;
use crate::types::{LiveMode, Role};

/// Password shared by every seeded account
pub const SEED_PASSWORD: &str = "password123";

/// (username, role, contact number, live mode)
const SEED_USERS: [(&str, Role, &str, LiveMode); 5] = [
    ("admin", Role::Admin, "+1234567890", LiveMode::Video),
    ("john_doe", Role::Member, "+1234567891", LiveMode::Audio),
    ("jane_smith", Role::Member, "+1234567892", LiveMode::Video),
    ("bob_audio", Role::Member, "+1234567893", LiveMode::Audio),
    ("alice_video", Role::Member, "+1234567894", LiveMode::Video),
];

/// Outcome of a seed run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

/// Create the demo accounts
///
/// Existing usernames are left untouched, so the command can be rerun.
pub async fn seed_demo_users(app_data: &AppData) -> Result<SeedSummary, InternalError> {
    let mut summary = SeedSummary::default();

    for (username, role, contact_number, live_mode) in SEED_USERS {
        if app_data.user_provider.username_exists(username).await? {
            tracing::debug!("Seed user {} already exists, skipping", username);
            summary.skipped.push(username.to_string());
            continue;
        }

        app_data
            .user_provider
            .create_user(NewUser::member(username, SEED_PASSWORD, contact_number, live_mode).with_role(role))
            .await?;
        tracing::info!("Seeded {} user {}", role.as_str(), username);
        summary.created.push(username.to_string());
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_app_data;

    #[tokio::test]
    async fn test_seed_creates_demo_accounts_once() {
        let app_data = setup_test_app_data().await;

        let first = seed_demo_users(&app_data).await.unwrap();
        assert_eq!(first.created.len(), 5);
        assert!(first.skipped.is_empty());

        let admin = app_data.user_store.find_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(app_data
            .crypto_provider
            .verify_password(SEED_PASSWORD, &admin.password_hash)
            .unwrap());

        let second = seed_demo_users(&app_data).await.unwrap();
        assert!(second.created.is_empty());
        assert_eq!(second.skipped.len(), 5);
        assert_eq!(app_data.user_store.count().await.unwrap(), 5);
    }
}
