//! Port for category list persistence.
//!
//! The [`CategoryRepository`] trait defines the contract for storing each
//! user's single ordered category list. Replacement is wholesale; there is no
//! per-entry patching, which keeps the stored list and the radar chart axes
//! trivially in sync.

use async_trait::async_trait;

use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "category repository query failed: {message}",
    }
}

/// Port for per-user category list storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Fetch the user's category list in stored order.
    ///
    /// Returns `None` when the user has never had a list seeded or saved.
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Vec<String>>, CategoryRepositoryError>;

    /// Replace the user's list wholesale, creating it if absent.
    ///
    /// Returns the stored list so callers can echo exactly what persisted.
    async fn replace(
        &self,
        user_id: &UserId,
        categories: &[String],
    ) -> Result<Vec<String>, CategoryRepositoryError>;

    /// Seed the default list, keeping any list that already exists.
    async fn seed_defaults(&self, user_id: &UserId) -> Result<(), CategoryRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups miss, replacements echo the input, and seeding is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCategoryRepository;

#[async_trait]
impl CategoryRepository for FixtureCategoryRepository {
    async fn find_by_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<Vec<String>>, CategoryRepositoryError> {
        Ok(None)
    }

    async fn replace(
        &self,
        _user_id: &UserId,
        categories: &[String],
    ) -> Result<Vec<String>, CategoryRepositoryError> {
        Ok(categories.to_vec())
    }

    async fn seed_defaults(&self, _user_id: &UserId) -> Result<(), CategoryRepositoryError> {
        Ok(())
    }
}
