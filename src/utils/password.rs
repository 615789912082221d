//! Password hashing and verification.
//!
//! Passwords are stretched with PBKDF2-HMAC-SHA256 using a random 16-byte salt
//! and stored as a PHC string:
//!
//! ```text
//! $pbkdf2-sha256$i=<rounds>,l=32$<salt, base64>$<hash, base64>
//! ```
//!
//! The round count travels with the hash, so raising `PASSWORD_HASH_ROUNDS`
//! only affects newly registered users.

use pbkdf2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::{Params, Pbkdf2};

const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Errors raised while hashing or verifying passwords.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("failed to generate salt: {0}")]
    Rng(String),

    #[error("failed to hash password: {0}")]
    Hash(password_hash::Error),

    #[error("stored password hash is malformed")]
    MalformedHash,
}

/// Hashes `password` with a fresh random salt.
///
/// # Errors
///
/// Returns [`PasswordError::Rng`] if the system random number generator fails.
/// Returns [`PasswordError::Hash`] if `rounds` is rejected by the hasher.
pub fn hash_password(password: &str, rounds: u32) -> Result<String, PasswordError> {
    let mut salt = [0u8; SALT_LEN];
    getrandom::fill(&mut salt).map_err(|e| PasswordError::Rng(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt).map_err(PasswordError::Hash)?;

    let params = Params {
        rounds,
        output_length: HASH_LEN,
    };

    let hash = Pbkdf2
        .hash_password_customized(password.as_bytes(), None, None, params, &salt)
        .map_err(PasswordError::Hash)?;

    Ok(hash.to_string())
}

/// Checks `password` against an encoded hash from [`hash_password`].
///
/// # Errors
///
/// Returns [`PasswordError::MalformedHash`] if `encoded` is not a PBKDF2 PHC
/// string.
pub fn verify_password(password: &str, encoded: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(encoded).map_err(|_| PasswordError::MalformedHash)?;

    match Pbkdf2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(_) => Err(PasswordError::MalformedHash),
    }
}
