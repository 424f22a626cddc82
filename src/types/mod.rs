// Types layer - All data structures
pub mod db;
pub mod dto;
pub mod internal;

pub use db::enums::{LiveMode, Role};
