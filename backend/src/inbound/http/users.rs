//! User account API handlers.
//!
//! ```text
//! POST /api/register {"email":"ada@example.com","password":"pw","name":"Ada"}
//! POST /api/login    {"email":"ada@example.com","password":"pw"}
//! POST /api/logout
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_string, FieldName};
use crate::inbound::http::ApiResult;

const EMAIL_FIELD: FieldName = FieldName::new("email");
const PASSWORD_FIELD: FieldName = FieldName::new("password");

/// Registration request body for `POST /api/register`.
///
/// All fields are optional at the serde level so an absent field produces a
/// structured `missing_field` error rather than a deserialisation failure.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Optional display name shown in the dashboard header.
    #[serde(default)]
    pub name: Option<String>,
}

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::Email(inner) => Error::invalid_request(inner.to_string())
            .with_details(json!({ "field": "email", "code": "invalid_email" })),
        RegistrationValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
        RegistrationValidationError::DisplayName(inner) => {
            Error::invalid_request(inner.to_string())
                .with_details(json!({ "field": "name", "code": "invalid_name" }))
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Create an account.
///
/// Registration does not log the user in; clients follow up with
/// `POST /api/login`.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let email = require_string(payload.email, EMAIL_FIELD)?;
    let password = require_string(payload.password, PASSWORD_FIELD)?;

    let registration = Registration::try_from_parts(&email, &password, payload.name.as_deref())
        .map_err(map_registration_validation_error)?;
    state.registration.register(registration).await?;

    Ok(HttpResponse::Created().json(json!({ "message": "User created successfully" })))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let email = require_string(payload.email, EMAIL_FIELD)?;
    let password = require_string(payload.password, PASSWORD_FIELD)?;

    let credentials = LoginCredentials::try_from_parts(&email, &password)
        .map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Logged in" })))
}

/// Drop the session cookie.
///
/// Idempotent: logging out without a session still succeeds.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session cleared"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.purge();
    Ok(HttpResponse::Ok().json(json!({ "message": "Logged out" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web, App};
    use rstest::rstest;
    use serde_json::Value;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::fixture()))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(
                web::scope("/api")
                    .service(register)
                    .service(login)
                    .service(logout),
            )
    }

    #[actix_web::test]
    async fn register_creates_an_account() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(&RegisterRequest {
                email: Some("ada@example.com".into()),
                password: Some("hunter2".into()),
                name: Some("Ada".into()),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("User created successfully")
        );
    }

    #[rstest]
    #[case::no_email(None, Some("pw"), "email")]
    #[case::no_password(Some("ada@example.com"), None, "password")]
    #[case::blank_email(Some("   "), Some("pw"), "email")]
    #[actix_web::test]
    async fn register_rejects_missing_fields(
        #[case] email: Option<&str>,
        #[case] password: Option<&str>,
        #[case] expected_field: &str,
    ) {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(&RegisterRequest {
                email: email.map(Into::into),
                password: password.map(Into::into),
                name: None,
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        let details = body.get("details").expect("details present");
        assert_eq!(
            details.get("field").and_then(Value::as_str),
            Some(expected_field)
        );
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("missing_field")
        );
    }

    #[actix_web::test]
    async fn register_rejects_malformed_email() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(&RegisterRequest {
                email: Some("no-at-sign".into()),
                password: Some("pw".into()),
                name: None,
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        let details = body.get("details").expect("details present");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_email")
        );
    }

    #[actix_web::test]
    async fn register_surfaces_duplicate_emails_as_conflict() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(&RegisterRequest {
                email: Some("taken@example.com".into()),
                password: Some("pw".into()),
                name: None,
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("User already exists")
        );
    }

    #[actix_web::test]
    async fn login_sets_the_session_cookie() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(&LoginRequest {
                email: Some("ada@example.com".into()),
                password: Some("password".into()),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .response()
            .cookies()
            .any(|cookie| cookie.name() == "session"));
    }

    #[actix_web::test]
    async fn login_rejects_wrong_credentials_with_unauthorised_status() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(&LoginRequest {
                email: Some("ada@example.com".into()),
                password: Some("wrong-password".into()),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("invalid credentials")
        );
        assert_eq!(
            body.get("code").and_then(Value::as_str),
            Some("unauthorized")
        );
    }

    #[actix_web::test]
    async fn logout_succeeds_without_a_session() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/logout")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
