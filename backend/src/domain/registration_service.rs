//! Account registration use-case.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::auth::Registration;
use crate::domain::ports::{
    CategoryRepository, PasswordHasher, RegistrationCommand, UserRepository, UserRepositoryError,
};
use crate::domain::user::{NewUser, User, UserId};
use crate::domain::Error;

fn map_user_repo_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user store query failed: {message}"))
        }
        UserRepositoryError::DuplicateEmail { .. } => Error::conflict("User already exists"),
    }
}

/// Registers accounts against the user repository.
///
/// The duplicate check runs twice: a pre-flight lookup gives the common case
/// a friendly conflict without hashing work, and the unique constraint on
/// insert catches the race where two registrations for the same email
/// interleave.
pub struct RegistrationService<U, H, C> {
    users: Arc<U>,
    hasher: Arc<H>,
    categories: Arc<C>,
}

impl<U, H, C> RegistrationService<U, H, C> {
    /// Wire the service to its collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>, categories: Arc<C>) -> Self {
        Self {
            users,
            hasher,
            categories,
        }
    }
}

#[async_trait]
impl<U, H, C> RegistrationCommand for RegistrationService<U, H, C>
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
    C: CategoryRepository + 'static,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_repo_error)?;
        if existing.is_some() {
            return Err(Error::conflict("User already exists"));
        }

        // Key derivation is CPU-bound; keep it off the async workers. The
        // copy stays in a Zeroizing wrapper so the blocking thread wipes it.
        let hasher = Arc::clone(&self.hasher);
        let password = registration.password_owned();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))?;

        let new_user = NewUser {
            id: UserId::random(),
            email: registration.email().clone(),
            display_name: registration.display_name().cloned(),
            password_hash,
        };
        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(map_user_repo_error)?;

        // The category read path tolerates an unseeded list, so a seeding
        // failure degrades the account rather than failing the registration.
        if let Err(err) = self.categories.seed_defaults(user.id()).await {
            warn!(user_id = %user.id(), error = %err, "failed to seed default categories");
        }

        Ok(user)
    }
}
