//! Builders for HTTP state ports and repository-backed service pairs.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use crate::domain::ports::{
    AssessmentsCommand, AssessmentsQuery, CategoriesCommand, CategoriesQuery, LoginService,
    RegistrationCommand,
};
use crate::domain::{
    AssessmentService, CategoryService, PasswordLoginService, RegistrationService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::auth::Argon2PasswordHasher;
use crate::outbound::persistence::{
    DbPool, DieselAssessmentRepository, DieselCategoryRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build login and registration services against a database pool.
fn build_account_services(
    pool: &DbPool,
) -> (Arc<dyn LoginService>, Arc<dyn RegistrationCommand>) {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let categories = Arc::new(DieselCategoryRepository::new(pool.clone()));
    (
        Arc::new(PasswordLoginService::new(users.clone(), hasher.clone())),
        Arc::new(RegistrationService::new(users, hasher, categories)),
    )
}

/// Build the assessment command/query pair from one shared service.
fn build_assessment_services(
    pool: &DbPool,
) -> (Arc<dyn AssessmentsCommand>, Arc<dyn AssessmentsQuery>) {
    let repository = Arc::new(DieselAssessmentRepository::new(pool.clone()));
    let service = Arc::new(AssessmentService::new(repository));
    (
        service.clone() as Arc<dyn AssessmentsCommand>,
        service as Arc<dyn AssessmentsQuery>,
    )
}

/// Build the category command/query pair from one shared service.
fn build_category_services(
    pool: &DbPool,
) -> (Arc<dyn CategoriesCommand>, Arc<dyn CategoriesQuery>) {
    let repository = Arc::new(DieselCategoryRepository::new(pool.clone()));
    let service = Arc::new(CategoryService::new(repository));
    (
        service.clone() as Arc<dyn CategoriesCommand>,
        service as Arc<dyn CategoriesQuery>,
    )
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
///
/// Without a database pool, every port is served by the in-memory fixtures so
/// the binary still runs for local development and smoke tests.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let Some(pool) = &config.db_pool else {
        warn!("no database configured, serving requests from in-memory fixtures");
        return web::Data::new(HttpState::fixture());
    };

    let (login, registration) = build_account_services(pool);
    let (assessments, assessments_query) = build_assessment_services(pool);
    let (categories, categories_query) = build_category_services(pool);

    web::Data::new(HttpState {
        login,
        registration,
        assessments,
        assessments_query,
        categories,
        categories_query,
    })
}
