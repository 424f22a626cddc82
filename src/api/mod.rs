// API layer - HTTP endpoints
pub mod auth;
pub mod health;
pub mod submissions;
pub mod users;

use std::sync::Arc;

pub use auth::{AuthApi, BearerAuth};
pub use health::HealthApi;
pub use submissions::{AccountabilityApi, FeedbackApi};
pub use users::UserApi;

use poem::{Request, Route};
use poem_openapi::OpenApiService;

use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::providers::TokenProvider;
use crate::types::internal::context::RequestContext;

/// Shared behavior of endpoint groups that require a bearer token
pub trait Api {
    fn token_provider(&self) -> &TokenProvider;

    /// Validate the bearer token and build the per-request context
    fn authenticate(&self, req: &Request, auth: &BearerAuth) -> Result<RequestContext, ApiError> {
        RequestContext::from_request(req, &auth.0, self.token_provider()).map_err(ApiError::from)
    }
}

/// All endpoints under `/api` plus Swagger UI under `/swagger`
pub fn routes(app_data: Arc<AppData>, server_url: &str) -> Route {
    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            UserApi::new(app_data.clone()),
            AccountabilityApi::new(app_data.clone()),
            FeedbackApi::new(app_data),
        ),
        "Ephrathah Membership API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);

    let ui = api_service.swagger_ui();

    Route::new().nest("/api", api_service).nest("/swagger", ui)
}
