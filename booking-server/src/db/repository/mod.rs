//! Repository Module
//!
//! CRUD operations as free functions over `&SqlitePool`.
//! Date→timestamp conversions happen in the handler layer; this layer
//! only sees `YYYY-MM-DD` strings and `i64` Unix millis.

// Catalog
pub mod event_type;
pub mod menu;
pub mod package;
pub mod shift;
pub mod venue;

// Bookings
pub mod booking;

// Accounts
pub mod admin;
pub mod user;

use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// True when a sqlx error is a UNIQUE constraint violation.
///
/// SQLite reports these as error code 2067 (SQLITE_CONSTRAINT_UNIQUE)
/// or 1555 (SQLITE_CONSTRAINT_PRIMARYKEY).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
