//! Driving ports for category list use-cases.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::user::UserId;
use crate::domain::Error;

/// Domain use-case port for replacing a user's category list.
#[async_trait]
pub trait CategoriesCommand: Send + Sync {
    /// Replace the list wholesale and return what persisted.
    async fn replace(&self, user_id: &UserId, categories: Vec<String>)
        -> Result<Vec<String>, Error>;
}

/// Domain use-case port for reading a user's category list.
#[async_trait]
pub trait CategoriesQuery: Send + Sync {
    /// The user's list in stored order, or empty when nothing is stored.
    async fn get(&self, user_id: &UserId) -> Result<Vec<String>, Error>;
}

/// Shared in-memory store used when no database is configured.
#[derive(Debug, Default, Clone)]
pub struct FixtureCategories {
    lists: Arc<Mutex<HashMap<UserId, Vec<String>>>>,
}

impl FixtureCategories {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<UserId, Vec<String>>>, Error> {
        self.lists
            .lock()
            .map_err(|_| Error::internal("fixture category store poisoned"))
    }
}

#[async_trait]
impl CategoriesCommand for FixtureCategories {
    async fn replace(
        &self,
        user_id: &UserId,
        categories: Vec<String>,
    ) -> Result<Vec<String>, Error> {
        self.lock()?.insert(user_id.clone(), categories.clone());
        Ok(categories)
    }
}

#[async_trait]
impl CategoriesQuery for FixtureCategories {
    async fn get(&self, user_id: &UserId) -> Result<Vec<String>, Error> {
        Ok(self.lock()?.get(user_id).cloned().unwrap_or_default())
    }
}
