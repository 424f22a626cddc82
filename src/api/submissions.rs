use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::{Api, BearerAuth};
use crate::app_data::AppData;
use crate::coordinators::SubmissionCoordinator;
use crate::errors::ApiError;
use crate::providers::TokenProvider;
use crate::types::dto::submission::{CreateSubmissionRequest, SubmissionResponse};

/// Handlers shared by the accountability and feedback endpoint groups
struct SubmissionEndpoints {
    token_provider: Arc<TokenProvider>,
    coordinator: SubmissionCoordinator,
}

impl Api for SubmissionEndpoints {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

impl SubmissionEndpoints {
    fn new(app_data: &AppData, coordinator: SubmissionCoordinator) -> Self {
        Self {
            token_provider: app_data.token_provider.clone(),
            coordinator,
        }
    }

    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateSubmissionRequest>,
    ) -> Result<Json<SubmissionResponse>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let created = self.coordinator.create(&ctx, body.0.content).await?;
        Ok(Json(created.into()))
    }

    async fn list(
        &self,
        req: &Request,
        auth: BearerAuth,
    ) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let records = self.coordinator.list(&ctx).await?;
        Ok(Json(records.into_iter().map(SubmissionResponse::from).collect()))
    }

    async fn get(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: i32,
    ) -> Result<Json<SubmissionResponse>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let record = self.coordinator.get(&ctx, id).await?;
        Ok(Json(record.into()))
    }

    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: i32,
    ) -> Result<Json<SubmissionResponse>, ApiError> {
        let ctx = self.authenticate(req, &auth)?;
        let removed = self.coordinator.delete(&ctx, id).await?;
        Ok(Json(removed.into()))
    }
}

#[derive(Tags)]
enum SubmissionTags {
    /// Accountability records
    Accountability,
    /// Feedback records
    Feedback,
}

/// Accountability record endpoints
pub struct AccountabilityApi(SubmissionEndpoints);

impl AccountabilityApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        let coordinator = SubmissionCoordinator::accountability(app_data.clone());
        Self(SubmissionEndpoints::new(&app_data, coordinator))
    }
}

#[OpenApi(prefix_path = "/accountability")]
impl AccountabilityApi {
    /// Submit an accountability record as the caller
    #[oai(path = "/", method = "post", tag = "SubmissionTags::Accountability")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateSubmissionRequest>,
    ) -> Result<Json<SubmissionResponse>, ApiError> {
        self.0.create(req, auth, body).await
    }

    /// Records visible to the caller, newest first
    #[oai(path = "/", method = "get", tag = "SubmissionTags::Accountability")]
    async fn list(
        &self,
        req: &Request,
        auth: BearerAuth,
    ) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
        self.0.list(req, auth).await
    }

    #[oai(path = "/:id", method = "get", tag = "SubmissionTags::Accountability")]
    async fn get(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<SubmissionResponse>, ApiError> {
        self.0.get(req, auth, id.0).await
    }

    /// Only ADMIN or the author may delete
    #[oai(path = "/:id", method = "delete", tag = "SubmissionTags::Accountability")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<SubmissionResponse>, ApiError> {
        self.0.delete(req, auth, id.0).await
    }
}

/// Feedback record endpoints
pub struct FeedbackApi(SubmissionEndpoints);

impl FeedbackApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        let coordinator = SubmissionCoordinator::feedback(app_data.clone());
        Self(SubmissionEndpoints::new(&app_data, coordinator))
    }
}

#[OpenApi(prefix_path = "/feedback")]
impl FeedbackApi {
    /// Submit feedback as the caller
    #[oai(path = "/", method = "post", tag = "SubmissionTags::Feedback")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateSubmissionRequest>,
    ) -> Result<Json<SubmissionResponse>, ApiError> {
        self.0.create(req, auth, body).await
    }

    /// Feedback visible to the caller, newest first
    #[oai(path = "/", method = "get", tag = "SubmissionTags::Feedback")]
    async fn list(
        &self,
        req: &Request,
        auth: BearerAuth,
    ) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
        self.0.list(req, auth).await
    }

    #[oai(path = "/:id", method = "get", tag = "SubmissionTags::Feedback")]
    async fn get(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<SubmissionResponse>, ApiError> {
        self.0.get(req, auth, id.0).await
    }

    /// Only ADMIN or the author may delete
    #[oai(path = "/:id", method = "delete", tag = "SubmissionTags::Feedback")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<SubmissionResponse>, ApiError> {
        self.0.delete(req, auth, id.0).await
    }
}
