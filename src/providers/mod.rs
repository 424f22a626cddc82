// Providers layer - Work performers and business logic
//
// Providers contain business logic and provide composable operations that
// coordinators can orchestrate. They perform actual work like hashing,
// token handling, authorization decisions and CSV encoding.

pub mod access_policy;
pub mod crypto_provider;
pub mod roster_codec;
pub mod token_provider;
pub mod user_provider;

// Re-export providers for clean imports
pub use crypto_provider::CryptoProvider;
pub use token_provider::TokenProvider;
pub use user_provider::UserProvider;
