//! Database error types.

use glossa_common::{ApiError, GlossaError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DbError {
    /// Turn a unique-constraint violation into `Duplicate`, pass anything else through.
    pub(crate) fn from_insert(err: sqlx::Error, what: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::Duplicate(what.into())
            }
            _ => DbError::Sqlx(err),
        }
    }
}

impl From<DbError> for GlossaError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(what) => GlossaError::NotFound(what),
            DbError::Validation(msg) => GlossaError::Validation(msg),
            DbError::Duplicate(what) => GlossaError::Validation(format!("{what} already exists")),
            other => GlossaError::Database(other.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        GlossaError::from(err).into()
    }
}
