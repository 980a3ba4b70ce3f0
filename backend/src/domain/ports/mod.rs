//! Domain ports: the traits the domain core exposes to adapters.
//!
//! Driven ports (repositories, the password hasher) are implemented by
//! outbound adapters; driving ports (the use-case traits) are implemented by
//! domain services and consumed by inbound adapters. Each port ships a
//! fixture implementation so handlers and the no-database development mode
//! stay testable without infrastructure.

mod macros;

pub mod assessment_repository;
pub mod assessments;
pub mod categories;
pub mod category_repository;
pub mod login_service;
pub mod password_hasher;
pub mod registration;
pub mod user_repository;

pub(crate) use macros::define_port_error;

pub use assessment_repository::{
    AssessmentRepository, AssessmentRepositoryError, FixtureAssessmentRepository,
};
pub use assessments::{AssessmentsCommand, AssessmentsQuery, FixtureAssessments};
pub use categories::{CategoriesCommand, CategoriesQuery, FixtureCategories};
pub use category_repository::{
    CategoryRepository, CategoryRepositoryError, FixtureCategoryRepository,
};
pub use login_service::{FixtureLoginService, LoginService, FIXTURE_USER_ID};
pub use password_hasher::{FixturePasswordHasher, PasswordHasher, PasswordHasherError};
pub use registration::{FixtureRegistrationCommand, RegistrationCommand};
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};

#[cfg(test)]
pub use assessment_repository::MockAssessmentRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(test)]
pub use user_repository::MockUserRepository;
