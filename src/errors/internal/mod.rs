use thiserror::Error;

pub mod access;
pub mod credential;
pub mod database;
pub mod user;

pub use access::AccessError;
pub use credential::CredentialError;
pub use database::DatabaseError;
pub use user::UserError;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors are shared; domain errors live in their own enums.
/// Not exposed via API - endpoints convert to `ApiError`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse { value_type: String, message: String },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    #[error("{message}")]
    Validation { field: String, message: String },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Access(#[from] AccessError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionBegin { source })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionCommit { source })
    }

    pub fn parse(value_type: &str, message: impl Into<String>) -> InternalError {
        InternalError::Parse {
            value_type: value_type.to_string(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> InternalError {
        InternalError::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> InternalError {
        InternalError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// True when the underlying database error is a unique-key collision
    pub fn is_unique_violation(&self) -> bool {
        match self {
            InternalError::Database(DatabaseError::Operation { source, .. }) => matches!(
                source.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ),
            _ => false,
        }
    }
}
