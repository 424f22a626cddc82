use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("Username already exists")]
    DuplicateUsername { username: String },

    #[error("User ID not found: {user_id}")]
    UserIdNotFound { user_id: i32 },

    #[error("Incharge not found: {incharge_id}")]
    UnknownIncharge { incharge_id: i32 },
}
