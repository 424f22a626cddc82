use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::config::SecretManager;
use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::types::internal::auth::{AccessToken, Claims};
use crate::types::internal::user::UserSummary;

/// Issues and validates HS256 access tokens
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
    jwt_expiration_minutes: i64,
}

impl TokenProvider {
    pub fn new(secret_manager: Arc<SecretManager>, jwt_expiration_minutes: i64) -> Self {
        Self {
            secret_manager,
            jwt_expiration_minutes,
        }
    }

    /// Issue a token for the given user
    ///
    /// Claims carry the user id as `sub` plus the username and role, so a
    /// request can be authorized without a database round trip.
    pub fn issue(&self, user: &UserSummary) -> Result<AccessToken, InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: now,
            exp: now + self.jwt_expiration_minutes * 60,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))?;

        tracing::debug!("Issued token for user {}", user.id);
        Ok(AccessToken::from(token))
    }

    /// Validate a JWT and return the claims
    pub fn validate(&self, token: &str) -> Result<Claims, InternalError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => InternalError::from(CredentialError::ExpiredToken),
            _ => {
                tracing::debug!("JWT rejected: {}", e);
                InternalError::from(CredentialError::invalid_token(
                    "invalid signature or malformed",
                ))
            }
        })
    }

    pub fn expiration_minutes(&self) -> i64 {
        self.jwt_expiration_minutes
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("secret_manager", &"<redacted>")
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .finish()
    }
}

impl fmt::Display for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenProvider {{ jwt_expiration: {}min }}",
            self.jwt_expiration_minutes
        )
    }
}
