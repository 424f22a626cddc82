// Stores layer - Data access and repository pattern
pub mod submission_store;
pub mod user_store;

pub use submission_store::{AccountabilityStore, FeedbackStore, SubmissionStore};
pub use user_store::{NewUserRecord, UserRecordChanges, UserStore};
