//! Cryptographic utilities shared across Suppleit crates
//!
//! Account passwords are stored as Argon2id PHC strings. Bearer tokens are
//! identified by a SHA-256 fingerprint, used as the revocation key.

use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use sha2::{Digest, Sha256};
use thiserror::Error;

const SALT_LEN: usize = 16;

#[derive(Error, Debug)]
pub enum PasswordHashError {
    #[error("Random source unavailable: {0}")]
    Random(#[from] getrandom::Error),

    #[error("Argon2 hashing failed: {0}")]
    Argon2(String),
}

/// Hash a password with a fresh random salt, returning a PHC string.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let mut salt_bytes = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt_bytes)?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| PasswordHashError::Argon2(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordHashError::Argon2(e.to_string()))
}

/// Verify a candidate password against a stored PHC string.
///
/// An unparsable stored hash never verifies.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

/// Stable identifier for a bearer token: `hex(sha256(token))`.
///
/// Revocation entries are keyed by fingerprint so raw tokens never sit in the store.
pub fn token_fingerprint(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
