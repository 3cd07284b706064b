//! Database error types for acre-db.

use acre_core::enums::EntityType;
use acre_core::forms::FormErrors;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema creation failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// No record with this id.
    #[error("{} {id} not found", entity.label())]
    NotFound { entity: EntityType, id: i64 },

    /// A list page past the last one.
    #[error("Invalid page {page}: there are {num_pages} page(s)")]
    PageNotFound { page: u32, num_pages: u32 },

    /// Submitted form failed validation or a constraint check.
    #[error("Validation failed: {0}")]
    Form(FormErrors),

    /// The acting username does not exist.
    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    /// The record is still referenced and cannot be deleted.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<FormErrors> for DatabaseError {
    fn from(errors: FormErrors) -> Self {
        Self::Form(errors)
    }
}
