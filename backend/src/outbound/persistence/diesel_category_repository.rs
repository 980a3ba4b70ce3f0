//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.
//!
//! Each user owns at most one `category_sets` row; replacement is an upsert
//! on the `user_id` primary key and seeding is an insert that yields to any
//! existing row.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{default_categories, UserId};

use super::models::{CategorySetRow, NewCategorySetRow};
use super::pool::{DbPool, PoolError};
use super::schema::category_sets;

/// Diesel-backed implementation of the `CategoryRepository` port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain category repository errors.
fn map_pool_error(error: PoolError) -> CategoryRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CategoryRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain category repository errors.
fn map_diesel_error(error: diesel::result::Error) -> CategoryRepositoryError {
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
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CategoryRepositoryError::connection("database connection error")
        }
        _ => CategoryRepositoryError::query("database error"),
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Vec<String>>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<CategorySetRow> = category_sets::table
            .filter(category_sets::user_id.eq(user_id.as_uuid()))
            .select(CategorySetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(|row| row.categories))
    }

    async fn replace(
        &self,
        user_id: &UserId,
        categories: &[String],
    ) -> Result<Vec<String>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewCategorySetRow {
            user_id: *user_id.as_uuid(),
            categories,
        };

        let stored: CategorySetRow = diesel::insert_into(category_sets::table)
            .values(&row)
            .on_conflict(category_sets::user_id)
            .do_update()
            .set((
                category_sets::categories.eq(categories),
                category_sets::updated_at.eq(Utc::now()),
            ))
            .returning(CategorySetRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(stored.categories)
    }

    async fn seed_defaults(&self, user_id: &UserId) -> Result<(), CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let defaults = default_categories();
        let row = NewCategorySetRow {
            user_id: *user_id.as_uuid(),
            categories: &defaults,
        };

        // A list the user already saved wins over the defaults.
        diesel::insert_into(category_sets::table)
            .values(&row)
            .on_conflict(category_sets::user_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(
            repo_err,
            CategoryRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ClosedConnection,
            Box::new("connection closed".to_owned()),
        );
        let repo_err = map_diesel_error(diesel_err);
        assert!(matches!(
            repo_err,
            CategoryRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn other_diesel_errors_map_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(repo_err, CategoryRepositoryError::Query { .. }));
    }
}
