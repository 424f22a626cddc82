// Database entities - SeaORM models
pub mod accountability;
pub mod enums;
pub mod feedback;
pub mod user;
