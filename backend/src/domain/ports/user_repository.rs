//! Port for user account persistence.
//!
//! The [`UserRepository`] trait defines the contract for creating accounts and
//! looking them up by login email. Adapters implement this trait to provide
//! durable storage (e.g., PostgreSQL). Email uniqueness is enforced at this
//! boundary so registration can surface a conflict instead of a raw database
//! error.

use async_trait::async_trait;

use crate::domain::user::{Email, NewUser, StoredUser, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// The email address is already registered.
        DuplicateEmail { email: String } =>
            "email already registered: {email}",
    }
}

/// Port for user account storage and retrieval.
///
/// Lookups are keyed by email because that is the login identifier; callers
/// that only hold a [`crate::domain::UserId`] never need the stored record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return its public identity.
    ///
    /// Fails with [`UserRepositoryError::DuplicateEmail`] when the email is
    /// already taken, including when a concurrent registration wins the race.
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Fetch the stored record (including the password hash) for an email.
    ///
    /// Returns `None` when no account exists for the address.
    async fn find_by_email(&self, email: &Email)
        -> Result<Option<StoredUser>, UserRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups always miss and inserts echo the payload back as a created user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserRepositoryError> {
        Ok(User::new(
            new_user.id.clone(),
            new_user.email.clone(),
            new_user.display_name.clone(),
            chrono::Utc::now(),
        ))
    }

    async fn find_by_email(
        &self,
        _email: &Email,
    ) -> Result<Option<StoredUser>, UserRepositoryError> {
        Ok(None)
    }
}
