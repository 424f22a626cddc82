use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Expired token")]
    ExpiredToken,
}

impl CredentialError {
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        CredentialError::InvalidToken {
            reason: reason.into(),
        }
    }
}
