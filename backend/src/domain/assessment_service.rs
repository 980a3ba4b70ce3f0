//! Assessment use-cases over the assessment repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::assessment::{Assessment, AssessmentId, NewAssessment};
use crate::domain::ports::{
    AssessmentRepository, AssessmentRepositoryError, AssessmentsCommand, AssessmentsQuery,
};
use crate::domain::user::UserId;
use crate::domain::Error;

fn map_repo_error(err: AssessmentRepositoryError) -> Error {
    match err {
        AssessmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("assessment store unavailable: {message}"))
        }
        AssessmentRepositoryError::Query { message } => {
            Error::internal(format!("assessment store query failed: {message}"))
        }
    }
}

/// Implements the assessment command and query ports over one repository.
pub struct AssessmentService<R> {
    repository: Arc<R>,
}

impl<R> AssessmentService<R> {
    /// Wire the service to its repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> AssessmentsCommand for AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    async fn create(&self, new_assessment: NewAssessment) -> Result<Assessment, Error> {
        self.repository
            .insert(&new_assessment)
            .await
            .map_err(map_repo_error)
    }

    async fn delete(&self, user_id: &UserId, id: &AssessmentId) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete_owned(user_id, id)
            .await
            .map_err(map_repo_error)?;
        if deleted {
            Ok(())
        } else {
            // Unknown id and someone else's id look identical on purpose.
            Err(Error::not_found("Assessment not found"))
        }
    }
}

#[async_trait]
impl<R> AssessmentsQuery for AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    async fn list(&self, user_id: &UserId) -> Result<Vec<Assessment>, Error> {
        self.repository
            .list_for_user(user_id)
            .await
            .map_err(map_repo_error)
    }
}
