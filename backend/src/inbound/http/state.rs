//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AssessmentsCommand, AssessmentsQuery, CategoriesCommand, CategoriesQuery, FixtureAssessments,
    FixtureCategories, FixtureLoginService, FixtureRegistrationCommand, LoginService,
    RegistrationCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationCommand>,
    pub assessments: Arc<dyn AssessmentsCommand>,
    pub assessments_query: Arc<dyn AssessmentsQuery>,
    pub categories: Arc<dyn CategoriesCommand>,
    pub categories_query: Arc<dyn CategoriesQuery>,
}

impl HttpState {
    /// State backed entirely by in-memory fixtures.
    ///
    /// Used for the no-database development mode and for handler tests that
    /// do not care about a particular port.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixture();
    /// let _login = state.login.clone();
    /// ```
    pub fn fixture() -> Self {
        let assessments = Arc::new(FixtureAssessments::new());
        let categories = Arc::new(FixtureCategories::new());
        Self {
            login: Arc::new(FixtureLoginService),
            registration: Arc::new(FixtureRegistrationCommand),
            assessments: assessments.clone(),
            assessments_query: assessments,
            categories: categories.clone(),
            categories_query: categories,
        }
    }
}
