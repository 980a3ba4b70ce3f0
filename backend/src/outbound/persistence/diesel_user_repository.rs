//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! This adapter implements the domain's `UserRepository` port. The unique
//! index on `users.email` is the authoritative duplicate check; a violation
//! surfaces as `UserRepositoryError::DuplicateEmail` so registration can
//! answer 409 even when two requests race.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{DisplayName, Email, NewUser, StoredUser, User, UserId, UserValidationError};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain user repository errors.
fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain user repository errors.
fn map_diesel_error(error: diesel::result::Error, email: &Email) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserRepositoryError::duplicate_email(email.as_ref())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        _ => UserRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain StoredUser.
fn row_to_stored_user(row: UserRow) -> Result<StoredUser, UserRepositoryError> {
    let display_name = row
        .display_name
        .map(DisplayName::new)
        .transpose()
        .map_err(row_integrity_error)?;
    Ok(StoredUser {
        id: UserId::from_uuid(row.id),
        email: Email::new(&row.email).map_err(row_integrity_error)?,
        display_name,
        password_hash: row.password_hash,
        created_at: row.created_at,
    })
}

fn row_integrity_error(err: UserValidationError) -> UserRepositoryError {
    UserRepositoryError::query(format!("stored user row failed validation: {err}"))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: *new_user.id.as_uuid(),
            email: new_user.email.as_ref(),
            password_hash: &new_user.password_hash,
            display_name: new_user.display_name.as_ref().map(AsRef::as_ref),
        };

        let inserted: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &new_user.email))?;

        Ok(row_to_stored_user(inserted)?.into_user())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredUser>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, email))?;

        result.map(row_to_stored_user).transpose()
    }
}
