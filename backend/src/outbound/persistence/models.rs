//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{assessments, category_sets, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub display_name: Option<&'a str>,
}

/// Row struct for reading from the category_sets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = category_sets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategorySetRow {
    #[expect(dead_code, reason = "lookups filter by user_id, the value itself is unused")]
    pub user_id: Uuid,
    pub categories: Vec<String>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating or replacing category lists.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = category_sets)]
pub(crate) struct NewCategorySetRow<'a> {
    pub user_id: Uuid,
    pub categories: &'a [String],
}

/// Row struct for reading from the assessments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assessments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssessmentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
    pub scores: serde_json::Value,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new assessment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assessments)]
pub(crate) struct NewAssessmentRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub date: DateTime<Utc>,
    pub scores: &'a serde_json::Value,
}
