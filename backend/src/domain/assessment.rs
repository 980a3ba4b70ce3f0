//! Assessment data model.
//!
//! An assessment is a named, timestamped snapshot of category→score ratings
//! owned by one user. The score mapping is deliberately sparse: keys carry no
//! referential integrity against the owner's current category list, so stale
//! or renamed categories simply render as zero on the chart.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Sparse category→score mapping.
///
/// Keys are free-form category names; values are the 0–10 slider ratings.
/// Missing keys are not an error anywhere in the system.
pub type ScoreMap = BTreeMap<String, f64>;

/// Validation errors returned by the assessment constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
}

impl fmt::Display for AssessmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "assessment id must not be empty"),
            Self::InvalidId => write!(f, "assessment id must be a valid UUID"),
            Self::EmptyName => write!(f, "assessment name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "assessment name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for AssessmentValidationError {}

/// Stable assessment identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssessmentId(Uuid, String);

impl AssessmentId {
    /// Validate and construct an [`AssessmentId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AssessmentValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`AssessmentId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Construct an [`AssessmentId`] from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, AssessmentValidationError> {
        if id.is_empty() {
            return Err(AssessmentValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(&id).map_err(|_| AssessmentValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for AssessmentId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AssessmentId> for String {
    fn from(value: AssessmentId) -> Self {
        let AssessmentId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for AssessmentId {
    type Error = AssessmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Maximum allowed length for an assessment name.
pub const ASSESSMENT_NAME_MAX: usize = 120;

/// Non-empty label the user gave the snapshot ("Q3 review", "after the
/// workshop", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentName(String);

impl AssessmentName {
    /// Validate and construct an [`AssessmentName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, AssessmentValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AssessmentValidationError::EmptyName);
        }
        if name.chars().count() > ASSESSMENT_NAME_MAX {
            return Err(AssessmentValidationError::NameTooLong {
                max: ASSESSMENT_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for AssessmentName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AssessmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AssessmentName> for String {
    fn from(value: AssessmentName) -> Self {
        value.0
    }
}

/// Persisted assessment snapshot.
///
/// ## Invariants
/// - `user_id` is immutable after creation; the record is only ever mutated
///   by deletion, which is owner-scoped.
/// - `scores` may be sparse relative to the owner's live category list.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    id: AssessmentId,
    user_id: UserId,
    name: AssessmentName,
    date: DateTime<Utc>,
    scores: ScoreMap,
}

impl Assessment {
    /// Build an [`Assessment`] from validated components.
    pub fn new(
        id: AssessmentId,
        user_id: UserId,
        name: AssessmentName,
        date: DateTime<Utc>,
        scores: ScoreMap,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            date,
            scores,
        }
    }

    /// Stable assessment identifier.
    pub fn id(&self) -> &AssessmentId {
        &self.id
    }

    /// Owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// User-supplied snapshot label.
    pub fn name(&self) -> &AssessmentName {
        &self.name
    }

    /// Timestamp the snapshot describes (defaults to creation time).
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Sparse category→score mapping.
    pub fn scores(&self) -> &ScoreMap {
        &self.scores
    }

    /// Score for one category, treating missing keys as zero.
    pub fn score_for(&self, category: &str) -> f64 {
        self.scores.get(category).copied().unwrap_or(0.0)
    }
}

/// New assessment payload handed to the assessment repository.
///
/// `date: None` means "stamp with the current time at insert".
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub user_id: UserId,
    pub name: AssessmentName,
    pub scores: ScoreMap,
    pub date: Option<DateTime<Utc>>,
}
