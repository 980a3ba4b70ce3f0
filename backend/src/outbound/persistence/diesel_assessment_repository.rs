//! PostgreSQL-backed `AssessmentRepository` implementation using Diesel ORM.
//!
//! Scores travel as a `jsonb` object. Values that are not JSON numbers (a
//! hand-edited row, a legacy import) read back as zero with a warning rather
//! than failing the whole listing.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{AssessmentRepository, AssessmentRepositoryError};
use crate::domain::{
    Assessment, AssessmentId, AssessmentName, NewAssessment, ScoreMap, UserId,
};

use super::models::{AssessmentRow, NewAssessmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::assessments;

/// Diesel-backed implementation of the `AssessmentRepository` port.
#[derive(Clone)]
pub struct DieselAssessmentRepository {
    pool: DbPool,
}

impl DieselAssessmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain assessment repository errors.
fn map_pool_error(error: PoolError) -> AssessmentRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AssessmentRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain assessment repository errors.
fn map_diesel_error(error: diesel::result::Error) -> AssessmentRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AssessmentRepositoryError::connection("database connection error")
        }
        _ => AssessmentRepositoryError::query("database error"),
    }
}

/// Decode a stored jsonb object into a score map.
fn decode_scores(id: uuid::Uuid, value: serde_json::Value) -> ScoreMap {
    let serde_json::Value::Object(entries) = value else {
        warn!(assessment_id = %id, "stored scores are not a JSON object, treating as empty");
        return ScoreMap::new();
    };

    entries
        .into_iter()
        .map(|(category, score)| {
            let score = score.as_f64().unwrap_or_else(|| {
                warn!(
                    assessment_id = %id,
                    category = %category,
                    "stored score is not a number, treating as zero"
                );
                0.0
            });
            (category, score)
        })
        .collect()
}

/// Convert a database row to a domain Assessment.
fn row_to_assessment(row: AssessmentRow) -> Result<Assessment, AssessmentRepositoryError> {
    let name = AssessmentName::new(row.name).map_err(|err| {
        AssessmentRepositoryError::query(format!("stored assessment row failed validation: {err}"))
    })?;
    let scores = decode_scores(row.id, row.scores);
    Ok(Assessment::new(
        AssessmentId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        name,
        row.date,
        scores,
    ))
}

#[async_trait]
impl AssessmentRepository for DieselAssessmentRepository {
    async fn insert(
        &self,
        new_assessment: &NewAssessment,
    ) -> Result<Assessment, AssessmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let scores = serde_json::to_value(&new_assessment.scores).map_err(|err| {
            AssessmentRepositoryError::query(format!("failed to encode scores: {err}"))
        })?;
        let row = NewAssessmentRow {
            id: *AssessmentId::random().as_uuid(),
            user_id: *new_assessment.user_id.as_uuid(),
            name: new_assessment.name.as_ref(),
            date: new_assessment.date.unwrap_or_else(Utc::now),
            scores: &scores,
        };

        let inserted: AssessmentRow = diesel::insert_into(assessments::table)
            .values(&row)
            .returning(AssessmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_assessment(inserted)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Assessment>, AssessmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AssessmentRow> = assessments::table
            .filter(assessments::user_id.eq(user_id.as_uuid()))
            .order(assessments::date.desc())
            .select(AssessmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_assessment).collect()
    }

    async fn delete_owned(
        &self,
        user_id: &UserId,
        id: &AssessmentId,
    ) -> Result<bool, AssessmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Ownership is part of the predicate so the query cannot touch
        // another user's row.
        let deleted_rows = diesel::delete(
            assessments::table.filter(
                assessments::id
                    .eq(id.as_uuid())
                    .and(assessments::user_id.eq(user_id.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted_rows > 0)
    }
}
