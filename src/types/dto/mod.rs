// DTOs - request and response bodies exposed through the OpenAPI schema
pub mod auth;
pub mod common;
pub mod submission;
pub mod user;
