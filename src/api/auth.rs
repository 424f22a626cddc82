use std::sync::Arc;

use poem::Request;
use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};

use crate::app_data::AppData;
use crate::coordinators::AuthCoordinator;
use crate::errors::ApiError;
use crate::types::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::types::internal::context::RequestContext;

/// Authentication API endpoints
pub struct AuthApi {
    auth_coordinator: AuthCoordinator,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(app_data),
        }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with username and password to receive an access token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(
        &self,
        req: &Request,
        body: Json<LoginRequest>,
    ) -> Result<Json<AuthResponse>, ApiError> {
        let ctx = RequestContext::anonymous(req);
        let (token, profile) = self
            .auth_coordinator
            .login(&ctx, &body.username, &body.password)
            .await?;

        Ok(Json(AuthResponse {
            access_token: token.into_string(),
            user: profile.into(),
        }))
    }

    /// Create a MEMBER account and log it in
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        req: &Request,
        body: Json<RegisterRequest>,
    ) -> Result<Json<AuthResponse>, ApiError> {
        let ctx = RequestContext::anonymous(req);
        let (token, profile) = self.auth_coordinator.register(&ctx, body.0.into()).await?;

        Ok(Json(AuthResponse {
            access_token: token.into_string(),
            user: profile.into(),
        }))
    }
}
