// API-facing error types
use std::fmt;

use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::errors::internal::{AccessError, CredentialError, InternalError, UserError};


/// Standardized error body returned by every endpoint
#[derive(Object, Debug, Clone)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// API error type shared by all endpoints
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Request body or upload is malformed
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Missing, invalid or expired credentials
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Caller's role does not permit the action
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Record absent or not visible to the caller
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Username already taken
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(body("bad_request", message, 400))
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized(body("invalid_credentials", "Invalid credentials", 401))
    }

    pub fn invalid_token() -> Self {
        ApiError::Unauthorized(body("invalid_token", "Invalid or malformed JWT", 401))
    }

    pub fn expired_token() -> Self {
        ApiError::Unauthorized(body("expired_token", "JWT has expired", 401))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(body("forbidden", message, 403))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(body("not_found", message, 404))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(body("conflict", message, 409))
    }

    /// Create a generic internal server error
    ///
    /// Never includes the underlying cause.
    pub fn internal_server_error() -> Self {
        ApiError::InternalError(body(
            "internal_error",
            "An internal error occurred",
            500,
        ))
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Infrastructure details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            // Infrastructure errors - always log and return generic error
            InternalError::Database(_) => {
                tracing::error!("Database error: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }

            InternalError::Validation { field, message } => {
                tracing::debug!("Validation failed on {}: {}", field, message);
                Self::bad_request(message.clone())
            }

            InternalError::Credential(CredentialError::InvalidCredentials) => {
                tracing::debug!("Invalid credentials attempt");
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::MissingToken) => Self::invalid_token(),
            InternalError::Credential(CredentialError::InvalidToken { reason }) => {
                tracing::debug!("Invalid token: {}", reason);
                Self::invalid_token()
            }
            InternalError::Credential(CredentialError::ExpiredToken) => {
                tracing::debug!("Expired token");
                Self::expired_token()
            }

            InternalError::User(UserError::DuplicateUsername { username }) => {
                tracing::warn!("Duplicate username attempt: {}", username);
                Self::conflict(err.to_string())
            }
            InternalError::User(UserError::UserIdNotFound { .. }) => {
                Self::not_found("User not found")
            }
            InternalError::User(UserError::UnknownIncharge { .. }) => {
                Self::bad_request(err.to_string())
            }

            InternalError::Access(AccessError::SubmissionNotVisible { .. }) => {
                Self::not_found(err.to_string())
            }
            InternalError::Access(denied) => {
                tracing::debug!("Access denied: {}", denied);
                Self::forbidden(denied.to_string())
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.response().message.clone()
    }

    /// HTTP status carried in the body
    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }

    fn response(&self) -> &ErrorResponse {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json) => &json.0,
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        ApiError::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
