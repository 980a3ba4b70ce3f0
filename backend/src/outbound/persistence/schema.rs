//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts table.
    ///
    /// Stores registered users keyed by UUID. Email is the login identifier
    /// and carries a unique constraint.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login email address (unique).
        email -> Varchar,
        /// Argon2id password hash in PHC string format.
        password_hash -> Varchar,
        /// Optional human-readable display name.
        display_name -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user skill category lists.
    ///
    /// One row per user; the array order is the radar chart axis order.
    category_sets (user_id) {
        /// Owning user (primary key, one list per user).
        user_id -> Uuid,
        /// Ordered category names.
        categories -> Array<Text>,
        /// Last replacement timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Assessment snapshots.
    ///
    /// Each row is one named, timestamped category-to-score mapping owned by
    /// a user. Scores are stored as a JSON object so category lists can
    /// evolve without migrations.
    assessments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// User-supplied snapshot label.
        name -> Varchar,
        /// Timestamp the snapshot describes.
        date -> Timestamptz,
        /// Sparse category name to score object.
        scores -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, category_sets, assessments);
