//! Password hashing for stored user records
//!
//! Passwords are hashed with Argon2id and stored in PHC string format, so the
//! salt and parameters travel with the hash.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

use super::errors::UserError;

/// Hash a password using Argon2id
///
/// # Returns
/// The Argon2 hash string (PHC format)
pub fn hash_password(password: impl AsRef<str>) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    Argon2::default()
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash {
            reason: e.to_string(),
        })
}

/// Verify a password against its stored hash
///
/// An unparsable hash counts as a mismatch.
pub fn verify_password(password: impl AsRef<str>, password_hash: impl AsRef<str>) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash.as_ref()) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_ref().as_bytes(), &parsed_hash)
        .is_ok()
}
