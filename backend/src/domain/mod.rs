//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, the ports connecting them, and the services that
//! implement the use-cases. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode — API error response payload and stable identifiers.
//! - TraceId — per-request correlation id carried in a task-local.
//! - User, Email, DisplayName — account identity types.
//! - LoginCredentials, Registration — validated authentication payloads.
//! - Assessment, ScoreMap — skill snapshot aggregate.
//! - SelectionWindow, build_chart_series — chart selection and composition.
//! - ports — traits adapters implement or call, with test fixtures.
//! - services — port implementations wiring repositories together.

pub mod assessment;
pub mod assessment_service;
pub mod auth;
pub mod category;
pub mod category_service;
pub mod comparison;
pub mod error;
pub mod password_login_service;
pub mod ports;
pub mod registration_service;
pub mod trace_id;
pub mod user;

pub use self::assessment::{
    Assessment, AssessmentId, AssessmentName, AssessmentValidationError, NewAssessment, ScoreMap,
};
pub use self::assessment_service::AssessmentService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
};
pub use self::category::{default_categories, DEFAULT_CATEGORIES, MIN_CATEGORIES};
pub use self::category_service::CategoryService;
pub use self::comparison::{
    build_chart_series, ChartData, ChartSeries, SelectionWindow, SeriesColor, SeriesStyle,
    MAX_COMPARED, SERIES_PALETTE,
};
pub use self::error::{Error, ErrorCode};
pub use self::password_login_service::PasswordLoginService;
pub use self::registration_service::RegistrationService;
pub use self::trace_id::{TraceId, TRACE_ID_HEADER};
pub use self::user::{
    DisplayName, Email, NewUser, StoredUser, User, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
