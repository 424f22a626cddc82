use std::fmt;

use crate::types::internal::user::UserSummary;

/// The two append-only record tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Accountability,
    Feedback,
}

impl SubmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Accountability => "accountability",
            SubmissionKind::Feedback => "feedback",
        }
    }

    /// Lower-case name used in denial messages
    pub fn noun(&self) -> &'static str {
        match self {
            SubmissionKind::Accountability => "accountability record",
            SubmissionKind::Feedback => "feedback",
        }
    }

    /// Capitalized name used in not-found messages
    pub fn title(&self) -> &'static str {
        match self {
            SubmissionKind::Accountability => "Accountability record",
            SubmissionKind::Feedback => "Feedback",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accountability or feedback entry with its author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: i64,
    pub author: Option<UserSummary>,
}

/// Ownership facts the access policy needs about a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOwner {
    pub user_id: i32,
    pub incharge_id: Option<i32>,
}
