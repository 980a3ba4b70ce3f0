//! Password hashing adapter backed by Argon2id.
//!
//! Implements the domain's `PasswordHasher` port using the PHC string format,
//! so the stored hash carries its own algorithm parameters and salt. Callers
//! are expected to run these methods on a blocking thread; key derivation is
//! deliberately slow.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Argon2id implementation of the `PasswordHasher` port.
///
/// Uses the `argon2` crate's default parameters, which track the current
/// OWASP recommendation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Construct the hasher.
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        argon2::PasswordHasher::hash_password(&Argon2::default(), password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHasherError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError> {
        let parsed =
            PasswordHash::new(hash).map_err(|err| PasswordHasherError::invalid_hash(err.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
