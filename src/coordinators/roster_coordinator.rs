use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::internal::AccessError;
use crate::errors::InternalError;
use crate::providers::roster_codec::{self, RosterLine, MISSING_FIELDS_MESSAGE};
use crate::providers::{access_policy, UserProvider};
use crate::stores::UserStore;
use crate::types::internal::auth::Requester;
use crate::types::internal::context::RequestContext;
use crate::types::internal::roster::ImportReport;
use crate::types::internal::user::NewUser;
use crate::types::Role;

/// Bulk roster export and import in CSV form
pub struct RosterCoordinator {
    user_store: Arc<UserStore>,
    user_provider: Arc<UserProvider>,
}

impl RosterCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            user_provider: app_data.user_provider.clone(),
        }
    }

    /// Every user as CSV, regardless of who supervises whom
    pub async fn export(&self, ctx: &RequestContext) -> Result<String, InternalError> {
        let requester = ctx.requester()?;
        access_policy::require_user_manager(requester)?;

        let users = self.user_store.list(&access_policy::Scope::All).await?;
        tracing::info!(
            request_id = %ctx.request_id,
            "User {} exported {} users",
            requester.id,
            users.len()
        );

        Ok(roster_codec::encode(&users))
    }

    /// Create one user per data line
    ///
    /// Lines are independent: a rejected line is reported and the rest are
    /// still processed. Only infrastructure failures on the requester check
    /// abort the whole import.
    pub async fn import(
        &self,
        ctx: &RequestContext,
        text: &str,
    ) -> Result<ImportReport, InternalError> {
        let requester = ctx.requester()?;
        access_policy::require_user_manager(requester)?;

        let mut report = ImportReport::default();
        for line in roster_codec::parse(text) {
            match self.import_line(requester, &line).await {
                Ok(()) => report.record_success(),
                Err(message) => report.record_error(line.line_number, message),
            }
        }

        tracing::info!(
            request_id = %ctx.request_id,
            "User {} imported {} users with {} rejected lines",
            requester.id,
            report.imported,
            report.errors.len()
        );
        Ok(report)
    }

    async fn import_line(&self, requester: &Requester, line: &RosterLine) -> Result<(), String> {
        if line.is_missing_required() {
            return Err(MISSING_FIELDS_MESSAGE.to_string());
        }

        let exists = self
            .user_provider
            .username_exists(&line.username)
            .await
            .map_err(|e| e.to_string())?;
        if exists {
            return Err(format!("User {} already exists", line.username));
        }

        let role = match line.role() {
            Ok(role) => role,
            Err(_) if requester.role == Role::Incharge => {
                return Err(AccessError::InchargeCreatesMembersOnly.to_string())
            }
            Err(message) => return Err(message),
        };
        access_policy::authorize_user_create(requester, role).map_err(|e| e.to_string())?;

        let live_mode = line.live_mode()?;

        let new_user = NewUser::member(
            line.username.clone(),
            line.password.clone(),
            line.contact_number.clone(),
            live_mode,
        )
        .with_role(role);

        self.user_provider
            .create_user(new_user)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
