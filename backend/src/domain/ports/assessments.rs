//! Driving ports for assessment use-cases.
//!
//! Split into command and query traits so read-only handlers depend only on
//! what they use. The fixtures share a small in-memory store, which keeps the
//! no-database development mode coherent: a snapshot created through the
//! command port shows up in the query port's listing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::assessment::{Assessment, AssessmentId, NewAssessment};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Domain use-case port for mutating assessments.
#[async_trait]
pub trait AssessmentsCommand: Send + Sync {
    /// Record a new snapshot for the user and return the stored row.
    async fn create(&self, new_assessment: NewAssessment) -> Result<Assessment, Error>;

    /// Delete one of the user's snapshots.
    ///
    /// Fails with a not-found error when the id does not resolve to a row the
    /// user owns.
    async fn delete(&self, user_id: &UserId, id: &AssessmentId) -> Result<(), Error>;
}

/// Domain use-case port for reading assessments.
#[async_trait]
pub trait AssessmentsQuery: Send + Sync {
    /// List the user's snapshots, most recent date first.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Assessment>, Error>;
}

/// Shared in-memory store used when no database is configured.
///
/// State is process-local and lost on restart.
#[derive(Debug, Default, Clone)]
pub struct FixtureAssessments {
    rows: Arc<Mutex<Vec<Assessment>>>,
}

impl FixtureAssessments {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Assessment>>, Error> {
        self.rows
            .lock()
            .map_err(|_| Error::internal("fixture assessment store poisoned"))
    }
}

#[async_trait]
impl AssessmentsCommand for FixtureAssessments {
    async fn create(&self, new_assessment: NewAssessment) -> Result<Assessment, Error> {
        let stored = Assessment::new(
            AssessmentId::random(),
            new_assessment.user_id,
            new_assessment.name,
            new_assessment.date.unwrap_or_else(chrono::Utc::now),
            new_assessment.scores,
        );
        self.lock()?.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, user_id: &UserId, id: &AssessmentId) -> Result<(), Error> {
        let mut rows = self.lock()?;
        let before = rows.len();
        rows.retain(|row| !(row.id() == id && row.user_id() == user_id));
        if rows.len() == before {
            return Err(Error::not_found("Assessment not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl AssessmentsQuery for FixtureAssessments {
    async fn list(&self, user_id: &UserId) -> Result<Vec<Assessment>, Error> {
        let mut rows: Vec<Assessment> = self
            .lock()?
            .iter()
            .filter(|row| row.user_id() == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(rows)
    }
}
