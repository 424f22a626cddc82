use std::sync::Arc;

use poem::Request;
use poem_openapi::payload::{Json, PlainText};
use poem_openapi::types::multipart::Upload;
use poem_openapi::{param::Path, ApiResponse, Multipart, OpenApi, Tags};

use crate::api::{Api, BearerAuth};
use crate::app_data::AppData;
use crate::coordinators::{RosterCoordinator, UserCoordinator};
use crate::errors::ApiError;
use crate::providers::TokenProvider;
use crate::types::dto::user::{
    CreateUserRequest, ImportResponse, UpdateProfileRequest, UpdateUserRequest, UserResponse,
};

/// User management and roster CSV endpoints
pub struct UserApi {
    token_provider: Arc<TokenProvider>,
    user_coordinator: UserCoordinator,
    roster_coordinator: RosterCoordinator,
}

impl UserApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: app_data.token_provider.clone(),
            user_coordinator: UserCoordinator::new(app_data.clone()),
            roster_coordinator: RosterCoordinator::new(app_data),
        }
    }
}

impl Api for UserApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[derive(Tags)]
enum UserTags {
    /// Own profile
    Profile,
    /// Account management for ADMIN and INCHARGE
    Users,
    /// Bulk CSV export and import
    Roster,
}

/// Multipart body of the roster import
#[derive(Multipart, Debug)]
pub struct RosterUpload {
    /// CSV file with header `username,password,contactNumber,liveMode,role`
    pub file: Option<Upload>,
}

#[derive(ApiResponse)]
pub enum CsvExportResponse {
    /// Roster of every user
    #[oai(status = 200, content_type = "text/csv")]
    Ok(
        PlainText<String>,
        #[oai(header = "Content-Disposition")] String,
    ),
}

#[OpenApi(prefix_path = "/users")]
impl UserApi {
    /// The caller's own account
    #[oai(path = "/profile", method = "get", tag = "UserTags::Profile")]
    async fn profile(&self, req: &Request, auth: BearerAuth) -> Result<Json<UserResponse>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let profile = self.user_coordinator.profile(&ctx).await?;
        Ok(Json(profile.into()))
    }

    /// Change the caller's password, contact number or live mode
    #[oai(path = "/profile", method = "put", tag = "UserTags::Profile")]
    async fn update_profile(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<UpdateProfileRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let profile = self.user_coordinator.update_profile(&ctx, body.0.into()).await?;
        Ok(Json(profile.into()))
    }

    /// All users for ADMIN, supervised members for INCHARGE
    #[oai(path = "/", method = "get", tag = "UserTags::Users")]
    async fn list(&self, req: &Request, auth: BearerAuth) -> Result<Json<Vec<UserResponse>>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let users = self.user_coordinator.list(&ctx).await?;
        Ok(Json(users.into_iter().map(UserResponse::from).collect()))
    }

    #[oai(path = "/", method = "post", tag = "UserTags::Users")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateUserRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let created = self.user_coordinator.create(&ctx, body.0.into()).await?;
        Ok(Json(created.into()))
    }

    #[oai(path = "/:id", method = "get", tag = "UserTags::Users")]
    async fn get(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let user = self.user_coordinator.get(&ctx, id.0).await?;
        Ok(Json(user.into()))
    }

    #[oai(path = "/:id", method = "put", tag = "UserTags::Users")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let updated = self.user_coordinator.update(&ctx, id.0, body.0.into()).await?;
        Ok(Json(updated.into()))
    }

    /// Delete a user along with their feedback and accountability records
    #[oai(path = "/:id", method = "delete", tag = "UserTags::Users")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let removed = self.user_coordinator.delete(&ctx, id.0).await?;
        Ok(Json(removed.into()))
    }

    /// Download every user as CSV
    ///
    /// The password column holds stored hashes, not plaintext.
    #[oai(path = "/export/csv", method = "get", tag = "UserTags::Roster")]
    async fn export_csv(&self, req: &Request, auth: BearerAuth) -> Result<CsvExportResponse, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let csv = self.roster_coordinator.export(&ctx).await?;
        Ok(CsvExportResponse::Ok(
            PlainText(csv),
            "attachment; filename=users.csv".to_string(),
        ))
    }

    /// Create users from an uploaded CSV file
    #[oai(path = "/import/csv", method = "post", tag = "UserTags::Roster")]
    async fn import_csv(
        &self,
        req: &Request,
        auth: BearerAuth,
        upload: RosterUpload,
    ) -> Result<Json<ImportResponse>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let file = upload
            .file
            .ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

        let bytes = file
            .into_vec()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;
        let text = String::from_utf8(bytes)
            .map_err(|_| ApiError::bad_request("Uploaded file is not valid UTF-8"))?;

        let report = self.roster_coordinator.import(&ctx, &text).await?;
        Ok(Json(report.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{bearer_for, seed_user, setup_test_app_data};
    use crate::types::{LiveMode, Role};

    #[tokio::test]
    async fn test_profile_requires_valid_token() {
        let app_data = setup_test_app_data().await;
        let api = UserApi::new(app_data);

        let req = Request::builder().finish();
        let auth = BearerAuth(poem_openapi::auth::Bearer {
            token: "not-a-jwt".to_string(),
        });

        let err = api.profile(&req, auth).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_member_listing_users_is_forbidden() {
        let app_data = setup_test_app_data().await;
        let member = seed_user(&app_data, "john_doe", Role::Member, None).await;
        let api = UserApi::new(app_data.clone());

        let req = Request::builder().finish();
        let err = api.list(&req, bearer_for(&app_data, &member)).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_incharge_creating_admin_is_forbidden() {
        let app_data = setup_test_app_data().await;
        let boss = seed_user(&app_data, "jane_smith", Role::Incharge, None).await;
        let api = UserApi::new(app_data.clone());

        let req = Request::builder().finish();
        let body = Json(CreateUserRequest {
            username: "sneaky".to_string(),
            password: "password123".to_string(),
            contact_number: "+1".to_string(),
            live_mode: LiveMode::Audio,
            role: Some(Role::Admin),
            watch_live_enabled: None,
            submit_feedback_enabled: None,
            submit_accountability_enabled: None,
            incharge_id: None,
        });

        let err = api
            .create(&req, bearer_for(&app_data, &boss), body)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert_eq!(err.message(), "Incharge can only create members");
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_not_found() {
        let app_data = setup_test_app_data().await;
        let admin = seed_user(&app_data, "admin", Role::Admin, None).await;
        let api = UserApi::new(app_data.clone());

        let req = Request::builder().finish();
        let err = api
            .get(&req, bearer_for(&app_data, &admin), Path(4040))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_export_sets_attachment_header() {
        let app_data = setup_test_app_data().await;
        let admin = seed_user(&app_data, "admin", Role::Admin, None).await;
        let api = UserApi::new(app_data.clone());

        let req = Request::builder().finish();
        let CsvExportResponse::Ok(PlainText(csv), disposition) = api
            .export_csv(&req, bearer_for(&app_data, &admin))
            .await
            .unwrap();

        assert_eq!(disposition, "attachment; filename=users.csv");
        assert!(csv.starts_with("username,password,contactNumber,liveMode,role\n"));
        assert!(csv.contains("admin,"));
    }

    #[tokio::test]
    async fn test_import_without_file_is_bad_request() {
        let app_data = setup_test_app_data().await;
        let admin = seed_user(&app_data, "admin", Role::Admin, None).await;
        let api = UserApi::new(app_data.clone());

        let req = Request::builder().finish();
        let err = api
            .import_csv(&req, bearer_for(&app_data, &admin), RosterUpload { file: None })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.message(), "No file uploaded");
    }
}
