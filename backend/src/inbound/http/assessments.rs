//! Assessments API handlers.
//!
//! ```text
//! POST   /api/assessments {"name":"Q3 review","scores":{"Coding":7},"date":"2026-08-01T00:00:00Z"}
//! GET    /api/assessments
//! DELETE /api/assessments?id=<uuid>
//! ```
//!
//! Every endpoint requires an authenticated session and only ever touches
//! the caller's own rows.

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Assessment, AssessmentId, AssessmentName, Error, NewAssessment, ScoreMap};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    invalid_value_error, missing_field_error, parse_optional_rfc3339_timestamp, parse_uuid,
    require_scores, require_string, FieldName,
};
use crate::inbound::http::ApiResult;

const NAME_FIELD: FieldName = FieldName::new("name");
const SCORES_FIELD: FieldName = FieldName::new("scores");
const DATE_FIELD: FieldName = FieldName::new("date");
const ID_FIELD: FieldName = FieldName::new("id");

/// Creation request body for `POST /api/assessments`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessmentRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Category name to 0-10 rating. Sparse maps are fine.
    #[serde(default)]
    pub scores: Option<ScoreMap>,
    /// RFC 3339 timestamp; omitted means "now".
    #[serde(default)]
    pub date: Option<String>,
}

/// One stored assessment as serialised in responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDto {
    pub id: String,
    pub name: String,
    /// RFC 3339 timestamp of the snapshot.
    pub date: String,
    pub scores: ScoreMap,
}

impl From<Assessment> for AssessmentDto {
    fn from(assessment: Assessment) -> Self {
        Self {
            id: assessment.id().to_string(),
            name: assessment.name().to_string(),
            date: assessment.date().to_rfc3339(),
            scores: assessment.scores().clone(),
        }
    }
}

/// Deletion selector for `DELETE /api/assessments`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DeleteAssessmentParams {
    /// Id of the snapshot to delete.
    #[serde(default)]
    pub id: Option<String>,
}

/// Record a new snapshot.
#[utoipa::path(
    post,
    path = "/api/assessments",
    request_body = CreateAssessmentRequest,
    responses(
        (status = 201, description = "Assessment stored", body = AssessmentDto),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["assessments"],
    operation_id = "createAssessment"
)]
#[post("/assessments")]
pub async fn create_assessment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateAssessmentRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();

    let name = require_string(payload.name, NAME_FIELD)?;
    let name = AssessmentName::new(name)
        .map_err(|err| invalid_value_error(NAME_FIELD, err.to_string()))?;
    let scores = require_scores(payload.scores, SCORES_FIELD)?;
    let date = parse_optional_rfc3339_timestamp(payload.date, DATE_FIELD)?;

    let stored = state
        .assessments
        .create(NewAssessment {
            user_id,
            name,
            scores,
            date,
        })
        .await?;

    Ok(HttpResponse::Created().json(json!({ "assessment": AssessmentDto::from(stored) })))
}

/// List the caller's snapshots, most recent first.
#[utoipa::path(
    get,
    path = "/api/assessments",
    responses(
        (status = 200, description = "Assessments in reverse date order"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["assessments"],
    operation_id = "listAssessments"
)]
#[get("/assessments")]
pub async fn list_assessments(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let assessments = state.assessments_query.list(&user_id).await?;
    let dtos: Vec<AssessmentDto> = assessments.into_iter().map(AssessmentDto::from).collect();
    Ok(HttpResponse::Ok().json(json!({ "assessments": dtos })))
}

/// Delete one of the caller's snapshots.
#[utoipa::path(
    delete,
    path = "/api/assessments",
    params(DeleteAssessmentParams),
    responses(
        (status = 200, description = "Assessment deleted"),
        (status = 400, description = "Missing or malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such assessment for this user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["assessments"],
    operation_id = "deleteAssessment"
)]
#[delete("/assessments")]
pub async fn delete_assessment(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<DeleteAssessmentParams>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let raw_id = params
        .into_inner()
        .id
        .ok_or_else(|| missing_field_error(ID_FIELD))?;
    let id = AssessmentId::from_uuid(parse_uuid(raw_id, ID_FIELD)?);

    state.assessments.delete(&user_id, &id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Assessment deleted" })))
}
