//! Shared helpers for HTTP flow tests.
//!
//! Provides in-memory implementations of the persistence ports so the real
//! domain services can be exercised end to end without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use backend::domain::ports::{
    AssessmentRepository, AssessmentRepositoryError, CategoryRepository, CategoryRepositoryError,
    FixturePasswordHasher, UserRepository, UserRepositoryError,
};
use backend::domain::{
    Assessment, AssessmentId, AssessmentService, CategoryService, Email, NewAssessment, NewUser,
    PasswordLoginService, RegistrationService, StoredUser, User, UserId, default_categories,
};
use backend::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, StoredUser>>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, StoredUser>>, UserRepositoryError> {
        self.users
            .lock()
            .map_err(|_| UserRepositoryError::query("user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut users = self.lock()?;
        let email = new_user.email.as_ref().to_owned();
        if users.contains_key(&email) {
            return Err(UserRepositoryError::duplicate_email(email));
        }
        let stored = StoredUser {
            id: new_user.id.clone(),
            email: new_user.email.clone(),
            display_name: new_user.display_name.clone(),
            password_hash: new_user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(email, stored.clone());
        Ok(stored.into_user())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredUser>, UserRepositoryError> {
        let users = self.lock()?;
        Ok(users.get(email.as_ref()).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryAssessmentRepository {
    rows: Mutex<Vec<Assessment>>,
}

impl InMemoryAssessmentRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Assessment>>, AssessmentRepositoryError> {
        self.rows
            .lock()
            .map_err(|_| AssessmentRepositoryError::query("assessment store poisoned"))
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn insert(
        &self,
        new_assessment: &NewAssessment,
    ) -> Result<Assessment, AssessmentRepositoryError> {
        let stored = Assessment::new(
            AssessmentId::random(),
            new_assessment.user_id.clone(),
            new_assessment.name.clone(),
            new_assessment.date.unwrap_or_else(Utc::now),
            new_assessment.scores.clone(),
        );
        self.lock()?.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Assessment>, AssessmentRepositoryError> {
        let rows = self.lock()?;
        let mut owned: Vec<Assessment> = rows
            .iter()
            .filter(|row| row.user_id() == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(owned)
    }

    async fn delete_owned(
        &self,
        user_id: &UserId,
        id: &AssessmentId,
    ) -> Result<bool, AssessmentRepositoryError> {
        let mut rows = self.lock()?;
        let before = rows.len();
        rows.retain(|row| !(row.id() == id && row.user_id() == user_id));
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    lists: Mutex<HashMap<Uuid, Vec<String>>>,
}

impl InMemoryCategoryRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Vec<String>>>, CategoryRepositoryError> {
        self.lists
            .lock()
            .map_err(|_| CategoryRepositoryError::query("category store poisoned"))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Vec<String>>, CategoryRepositoryError> {
        let lists = self.lock()?;
        Ok(lists.get(user_id.as_uuid()).cloned())
    }

    async fn replace(
        &self,
        user_id: &UserId,
        categories: &[String],
    ) -> Result<Vec<String>, CategoryRepositoryError> {
        let mut lists = self.lock()?;
        lists.insert(*user_id.as_uuid(), categories.to_vec());
        Ok(categories.to_vec())
    }

    async fn seed_defaults(&self, user_id: &UserId) -> Result<(), CategoryRepositoryError> {
        let mut lists = self.lock()?;
        lists
            .entry(*user_id.as_uuid())
            .or_insert_with(default_categories);
        Ok(())
    }
}

/// HTTP state backed by the in-memory repositories and the real services.
pub fn in_memory_state() -> HttpState {
    let users = Arc::new(InMemoryUserRepository::default());
    let hasher = Arc::new(FixturePasswordHasher);
    let categories_repo = Arc::new(InMemoryCategoryRepository::default());
    let assessments_repo = Arc::new(InMemoryAssessmentRepository::default());

    let assessments = Arc::new(AssessmentService::new(assessments_repo));
    let categories = Arc::new(CategoryService::new(categories_repo.clone()));

    HttpState {
        login: Arc::new(PasswordLoginService::new(users.clone(), hasher.clone())),
        registration: Arc::new(RegistrationService::new(users, hasher, categories_repo)),
        assessments: assessments.clone(),
        assessments_query: assessments,
        categories: categories.clone(),
        categories_query: categories,
    }
}
