//! Categories API handlers.
//!
//! ```text
//! GET /api/categories
//! PUT /api/categories {"categories":["Coding","Design","Communication"]}
//! ```
//!
//! The list is replaced wholesale on PUT and stored verbatim. Blank entries
//! are rejected; an otherwise short list is accepted because the minimum
//! length rule lives in the settings UI, not here.

use actix_web::{get, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::Error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_value_error, missing_field_error, FieldName};
use crate::inbound::http::ApiResult;

const CATEGORIES_FIELD: FieldName = FieldName::new("categories");

/// Replacement request body for `PUT /api/categories`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesRequest {
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

// Entries are stored verbatim. Historical score keys may carry the same
// surrounding whitespace, and rewriting names here would orphan those scores.
fn validate_categories(categories: Vec<String>) -> Result<Vec<String>, Error> {
    if categories.iter().any(|name| name.trim().is_empty()) {
        return Err(invalid_value_error(
            CATEGORIES_FIELD,
            "categories must not contain blank entries",
        ));
    }
    Ok(categories)
}

/// Fetch the caller's category list.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Category list, empty when never saved"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["categories"],
    operation_id = "getCategories"
)]
#[get("/categories")]
pub async fn get_categories(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let categories = state.categories_query.get(&user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "categories": categories })))
}

/// Replace the caller's category list.
#[utoipa::path(
    put,
    path = "/api/categories",
    request_body = CategoriesRequest,
    responses(
        (status = 200, description = "Stored list echoed back"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["categories"],
    operation_id = "putCategories"
)]
#[put("/categories")]
pub async fn put_categories(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CategoriesRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let categories = payload
        .into_inner()
        .categories
        .ok_or_else(|| missing_field_error(CATEGORIES_FIELD))?;
    let categories = validate_categories(categories)?;

    let stored = state.categories.replace(&user_id, categories).await?;
    Ok(HttpResponse::Ok().json(json!({ "categories": stored })))
}
