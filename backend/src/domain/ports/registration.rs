//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::auth::Registration;
use crate::domain::user::{User, UserId};
use crate::domain::Error;

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Create an account and return the public identity.
    ///
    /// Fails with a conflict error when the email is already registered.
    async fn register(&self, registration: Registration) -> Result<User, Error>;
}

/// In-memory registrar used when no database is configured.
///
/// Accepts every registration except `taken@example.com`, which simulates a
/// duplicate so conflict handling stays exercisable without persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRegistrationCommand;

#[async_trait]
impl RegistrationCommand for FixtureRegistrationCommand {
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        if registration.email().as_ref() == "taken@example.com" {
            return Err(Error::conflict("User already exists"));
        }
        Ok(User::new(
            UserId::random(),
            registration.email().clone(),
            registration.display_name().cloned(),
            chrono::Utc::now(),
        ))
    }
}
