//! End-to-end HTTP flows through the real domain services.
//!
//! Uses in-memory repository implementations from `support` so registration,
//! login, assessment CRUD, and category management run against the same
//! service wiring as production, minus the database.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use backend::inbound::http::assessments::{create_assessment, delete_assessment, list_assessments};
use backend::inbound::http::categories::{get_categories, put_categories};
use backend::inbound::http::users::{login, logout, register};

mod support;

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(support::in_memory_state()))
        .app_data(backend::inbound::http::json_config())
        .wrap(support::session_middleware())
        .service(
            web::scope("/api")
                .service(register)
                .service(login)
                .service(logout)
                .service(create_assessment)
                .service(list_assessments)
                .service(delete_assessment)
                .service(get_categories)
                .service(put_categories),
        )
}

async fn register_user(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
) {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "email": email, "password": "hunter2", "name": "Ada" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn login_user(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
) -> Cookie<'static> {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "email": email, "password": "hunter2" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned()
}

#[actix_web::test]
async fn registration_rejects_duplicate_emails() {
    let app = actix_test::init_service(test_app()).await;
    register_user(&app, "ada@example.com").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "email": "ada@example.com", "password": "other" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("User already exists")
    );
}

#[actix_web::test]
async fn login_rejects_wrong_password_after_registration() {
    let app = actix_test::init_service(test_app()).await;
    register_user(&app, "ada@example.com").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "email": "ada@example.com", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("invalid credentials")
    );
}

#[actix_web::test]
async fn assessments_require_a_session() {
    let app = actix_test::init_service(test_app()).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/assessments")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn assessment_lifecycle_creates_lists_and_deletes() {
    let app = actix_test::init_service(test_app()).await;
    register_user(&app, "ada@example.com").await;
    let cookie = login_user(&app, "ada@example.com").await;

    let earlier = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/assessments")
            .cookie(cookie.clone())
            .set_json(json!({
                "name": "Q1 review",
                "scores": { "Coding": 3.0, "Design": 4.0 },
                "date": "2026-01-15T09:00:00Z"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(earlier.status(), StatusCode::CREATED);

    let later = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/assessments")
            .cookie(cookie.clone())
            .set_json(json!({
                "name": "Q2 review",
                "scores": { "Coding": 4.0, "Design": 4.5 },
                "date": "2026-04-15T09:00:00Z"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(later.status(), StatusCode::CREATED);
    let later_body: Value = actix_test::read_body_json(later).await;
    let later_id = later_body["assessment"]["id"]
        .as_str()
        .expect("created id")
        .to_owned();

    let listing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/assessments")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(listing.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(listing).await;
    let rows = body["assessments"].as_array().expect("assessment array");
    assert_eq!(rows.len(), 2);
    // Most recent date first.
    assert_eq!(rows[0]["name"], "Q2 review");
    assert_eq!(rows[1]["name"], "Q1 review");
    assert_eq!(rows[0]["scores"]["Coding"], 4.0);

    let unknown = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/assessments?id=7e57ed00-0000-4000-8000-000000000000")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/assessments?id={later_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let listing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/assessments")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(listing).await;
    let rows = body["assessments"].as_array().expect("assessment array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Q1 review");
}

#[actix_web::test]
async fn deleting_another_users_assessment_reports_not_found() {
    let app = actix_test::init_service(test_app()).await;
    register_user(&app, "ada@example.com").await;
    register_user(&app, "grace@example.com").await;
    let ada = login_user(&app, "ada@example.com").await;
    let grace = login_user(&app, "grace@example.com").await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/assessments")
            .cookie(ada.clone())
            .set_json(json!({ "name": "Private", "scores": { "Coding": 5.0 } }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(created).await;
    let id = body["assessment"]["id"].as_str().expect("created id");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/assessments?id={id}"))
            .cookie(grace)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner still sees the row.
    let listing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/assessments")
            .cookie(ada)
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(listing).await;
    assert_eq!(body["assessments"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn registration_seeds_the_default_category_list() {
    let app = actix_test::init_service(test_app()).await;
    register_user(&app, "ada@example.com").await;
    let cookie = login_user(&app, "ada@example.com").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/categories")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["categories"],
        json!(["Coding", "Design", "Communication", "Leadership", "Problem Solving"])
    );
}

#[actix_web::test]
async fn non_array_categories_payload_gets_the_error_envelope() {
    let app = actix_test::init_service(test_app()).await;
    register_user(&app, "ada@example.com").await;
    let cookie = login_user(&app, "ada@example.com").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/categories")
            .cookie(cookie.clone())
            .set_json(json!({ "categories": "not-an-array" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    assert!(
        body.get("message")
            .and_then(Value::as_str)
            .is_some_and(|message| !message.is_empty())
    );

    // The rejected payload must not have touched the stored list.
    let listing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/categories")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(listing).await;
    assert_eq!(
        body["categories"],
        json!(["Coding", "Design", "Communication", "Leadership", "Problem Solving"])
    );
}

#[actix_web::test]
async fn replacing_categories_persists_the_new_list() {
    let app = actix_test::init_service(test_app()).await;
    register_user(&app, "ada@example.com").await;
    let cookie = login_user(&app, "ada@example.com").await;

    let replaced = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/categories")
            .cookie(cookie.clone())
            .set_json(json!({ "categories": ["Rust", "SQL", "Architecture"] }))
            .to_request(),
    )
    .await;
    assert_eq!(replaced.status(), StatusCode::OK);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/categories")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["categories"], json!(["Rust", "SQL", "Architecture"]));
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let app = actix_test::init_service(test_app()).await;
    register_user(&app, "ada@example.com").await;
    let cookie = login_user(&app, "ada@example.com").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie rewritten");
    assert_eq!(cleared.value(), "");
}
