//! Port for password hashing and verification.
//!
//! Hashing is CPU-bound and synchronous by nature, so the trait is sync;
//! async callers run it on a blocking thread. Keeping the algorithm behind a
//! port lets unit tests swap in a transparent fixture instead of paying for
//! a real key derivation on every assertion.

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hasher adapters.
    pub enum PasswordHasherError {
        /// Hashing the password failed.
        Hash { message: String } =>
            "password hashing failed: {message}",
        /// The stored hash could not be parsed for verification.
        InvalidHash { message: String } =>
            "stored password hash is invalid: {message}",
    }
}

/// Port for one-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a self-describing hash string for the password.
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    /// Check a candidate password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; only an unparseable hash is an error.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError>;
}

/// Transparent fixture hasher for tests.
///
/// "Hashes" are the plain password behind a marker prefix, so tests can
/// construct stored users without running a key derivation function.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

const FIXTURE_PREFIX: &str = "plain:";

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        Ok(format!("{FIXTURE_PREFIX}{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError> {
        let Some(stored) = hash.strip_prefix(FIXTURE_PREFIX) else {
            return Err(PasswordHasherError::invalid_hash(format!(
                "missing {FIXTURE_PREFIX} prefix"
            )));
        };
        Ok(stored == password)
    }
}
