// Internal types shared across coordinators, providers and stores
pub mod auth;
pub mod context;
pub mod roster;
pub mod submission;
pub mod user;
