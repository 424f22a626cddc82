// Coordinators layer - Workflow orchestration
//
// Coordinators compose store and provider operations for specific API
// endpoints and CLI commands. Authorization verdicts come from
// providers::access_policy; coordinators only sequence the calls.

pub mod auth_coordinator;
pub mod roster_coordinator;
pub mod submission_coordinator;
pub mod user_coordinator;

pub use auth_coordinator::AuthCoordinator;
pub use roster_coordinator::RosterCoordinator;
pub use submission_coordinator::SubmissionCoordinator;
pub use user_coordinator::UserCoordinator;
