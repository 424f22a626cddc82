use std::fmt;
use std::sync::Arc;

use argon2::{
    password_hash::{ParamsString, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};

use crate::config::SecretManager;
use crate::errors::InternalError;

/// Password hashing provider
///
/// Argon2id with the server-side pepper supplied as the Argon2 secret
/// parameter. Hashes are stored as PHC strings with a fresh random salt.
///
/// The stored string omits the cost parameters segment (`m=..,t=..,p=..`),
/// so it never contains a comma and survives the roster CSV unquoted.
/// Verification reads the costs back as `Params::default()`, which must
/// stay the hashing parameters.
pub struct CryptoProvider {
    secret_manager: Arc<SecretManager>,
}

impl CryptoProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self { secret_manager }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.secret_manager.password_pepper().as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a plaintext password into a PHC string without cost parameters
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let argon2 = self.argon2()?;
        let mut hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?;
        hash.params = ParamsString::new();
        Ok(hash.to_string())
    }

    /// Check a plaintext password against a stored hash
    ///
    /// A stored value that is not a valid PHC string never matches.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, InternalError> {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                return Ok(false);
            }
        };

        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl fmt::Debug for CryptoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoProvider")
            .field("secret_manager", &"<redacted>")
            .finish()
    }
}
