//! Password-backed implementation of the login port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LoginService, PasswordHasher, UserRepository, UserRepositoryError};
use crate::domain::user::Email;
use crate::domain::{Error, LoginCredentials, UserId};

fn map_user_repo_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user store query failed: {message}"))
        }
        UserRepositoryError::DuplicateEmail { email } => {
            Error::internal(format!("unexpected duplicate email on lookup: {email}"))
        }
    }
}

/// Authenticates credentials against stored password hashes.
///
/// Every failure the caller could probe (unknown email, malformed email,
/// wrong password) collapses into the same unauthorized error so responses
/// do not reveal which accounts exist.
pub struct PasswordLoginService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> PasswordLoginService<U, H> {
    /// Wire the service to its collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> LoginService for PasswordLoginService<U, H>
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Ok(email) = Email::new(credentials.email()) else {
            return Err(Error::unauthorized("invalid credentials"));
        };

        let Some(stored) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_repo_error)?
        else {
            return Err(Error::unauthorized("invalid credentials"));
        };

        // The copy stays in a Zeroizing wrapper so the blocking thread wipes
        // it once verification finishes.
        let hasher = Arc::clone(&self.hasher);
        let password = credentials.password_owned();
        let hash = stored.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(|err| Error::internal(format!("password verification failed: {err}")))?;

        if matches {
            Ok(stored.id)
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{FixturePasswordHasher, MockUserRepository};
    use crate::domain::user::StoredUser;
    use crate::domain::ErrorCode;
    use chrono::Utc;
    use rstest::rstest;

    fn stored_user(password_hash: &str) -> StoredUser {
        StoredUser {
            id: UserId::random(),
            email: Email::new("ada@example.com").expect("valid email"),
            display_name: None,
            password_hash: password_hash.to_owned(),
            created_at: Utc::now(),
        }
    }

    fn service(
        users: MockUserRepository,
    ) -> PasswordLoginService<MockUserRepository, FixturePasswordHasher> {
        PasswordLoginService::new(Arc::new(users), Arc::new(FixturePasswordHasher))
    }

    #[tokio::test]
    async fn correct_password_authenticates() {
        let stored = stored_user("plain:hunter2");
        let expected_id = stored.id.clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let creds =
            LoginCredentials::try_from_parts("ada@example.com", "hunter2").expect("credentials");
        let id = service(users)
            .authenticate(&creds)
            .await
            .expect("authentication should succeed");
        assert_eq!(id, expected_id);
    }

    #[rstest]
    #[case::wrong_password("ada@example.com", "hunter3")]
    #[case::unknown_account("grace@example.com", "hunter2")]
    #[case::malformed_email("not-an-email", "hunter2")]
    #[tokio::test]
    async fn failures_collapse_to_unauthorized(#[case] email: &str, #[case] password: &str) {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|lookup| {
            if lookup.as_ref() == "ada@example.com" {
                Ok(Some(stored_user("plain:hunter2")))
            } else {
                Ok(None)
            }
        });

        let creds = LoginCredentials::try_from_parts(email, password).expect("credentials");
        let err = service(users)
            .authenticate(&creds)
            .await
            .expect_err("authentication must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid credentials");
    }

    #[tokio::test]
    async fn store_outage_is_service_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Err(UserRepositoryError::connection("pool exhausted")));

        let creds =
            LoginCredentials::try_from_parts("ada@example.com", "hunter2").expect("credentials");
        let err = service(users)
            .authenticate(&creds)
            .await
            .expect_err("outage must surface");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
