//! Argon2 password hashes for stored accounts

use crate::utils::error::{GatewayError, Result};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// PHC-format Argon2id hash with a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| GatewayError::internal(format!("Failed to hash password: {}", e)))
}

/// `Ok(false)` on a wrong password; `Err` only when the stored hash is unusable
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| GatewayError::internal(format!("Stored password hash is invalid: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(GatewayError::internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// Cheap syntax check used when validating seeded accounts
pub fn is_password_hash(hash: &str) -> bool {
    PasswordHash::new(hash).is_ok()
}
