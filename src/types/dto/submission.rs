use poem_openapi::Object;

use crate::types::dto::common::to_rfc3339;
use crate::types::dto::user::UserSummaryResponse;
use crate::types::internal::submission::Submission;

/// Request model for a new accountability or feedback entry
#[derive(Object, Debug)]
pub struct CreateSubmissionRequest {
    /// Free text, must not be blank
    pub content: String,
}

/// An accountability or feedback entry with its author
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: i32,
    pub user_id: i32,
    pub content: String,

    /// RFC 3339
    pub created_at: String,

    /// Author of the entry
    pub user: Option<UserSummaryResponse>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            user_id: submission.user_id,
            content: submission.content,
            created_at: to_rfc3339(submission.created_at),
            user: submission.author.map(UserSummaryResponse::from),
        }
    }
}
