//! Category list use-cases over the category repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CategoriesCommand, CategoriesQuery, CategoryRepository, CategoryRepositoryError,
};
use crate::domain::user::UserId;
use crate::domain::Error;

fn map_repo_error(err: CategoryRepositoryError) -> Error {
    match err {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category store unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category store query failed: {message}"))
        }
    }
}

/// Implements the category command and query ports over one repository.
pub struct CategoryService<R> {
    repository: Arc<R>,
}

impl<R> CategoryService<R> {
    /// Wire the service to its repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CategoriesCommand for CategoryService<R>
where
    R: CategoryRepository + 'static,
{
    async fn replace(
        &self,
        user_id: &UserId,
        categories: Vec<String>,
    ) -> Result<Vec<String>, Error> {
        self.repository
            .replace(user_id, &categories)
            .await
            .map_err(map_repo_error)
    }
}

#[async_trait]
impl<R> CategoriesQuery for CategoryService<R>
where
    R: CategoryRepository + 'static,
{
    async fn get(&self, user_id: &UserId) -> Result<Vec<String>, Error> {
        // An account whose list was never seeded reads back as empty rather
        // than erroring; the dashboard renders an empty chart frame for it.
        Ok(self
            .repository
            .find_by_user(user_id)
            .await
            .map_err(map_repo_error)?
            .unwrap_or_default())
    }
}
