//! Port for assessment persistence.
//!
//! The [`AssessmentRepository`] trait defines the contract for storing,
//! listing, and deleting assessment snapshots. All operations are scoped to
//! an owning user; there is no way to address another user's rows through
//! this port.

use async_trait::async_trait;

use crate::domain::assessment::{Assessment, AssessmentId, NewAssessment};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by assessment repository adapters.
    pub enum AssessmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "assessment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "assessment repository query failed: {message}",
    }
}

/// Port for assessment storage, scoped to the owning user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Insert a new snapshot and return the stored row.
    ///
    /// The adapter generates the id and, when `new_assessment.date` is
    /// `None`, stamps the row with the current time.
    async fn insert(
        &self,
        new_assessment: &NewAssessment,
    ) -> Result<Assessment, AssessmentRepositoryError>;

    /// List every snapshot owned by the user, most recent date first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Assessment>, AssessmentRepositoryError>;

    /// Delete one snapshot if (and only if) the user owns it.
    ///
    /// Returns `false` when no matching row exists, which covers both an
    /// unknown id and an id owned by someone else. The two cases are
    /// deliberately indistinguishable to callers.
    async fn delete_owned(
        &self,
        user_id: &UserId,
        id: &AssessmentId,
    ) -> Result<bool, AssessmentRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Listings are empty, deletions always miss, and inserts materialise the
/// payload with a fresh id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAssessmentRepository;

#[async_trait]
impl AssessmentRepository for FixtureAssessmentRepository {
    async fn insert(
        &self,
        new_assessment: &NewAssessment,
    ) -> Result<Assessment, AssessmentRepositoryError> {
        Ok(Assessment::new(
            AssessmentId::random(),
            new_assessment.user_id.clone(),
            new_assessment.name.clone(),
            new_assessment.date.unwrap_or_else(chrono::Utc::now),
            new_assessment.scores.clone(),
        ))
    }

    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Assessment>, AssessmentRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete_owned(
        &self,
        _user_id: &UserId,
        _id: &AssessmentId,
    ) -> Result<bool, AssessmentRepositoryError> {
        Ok(false)
    }
}
