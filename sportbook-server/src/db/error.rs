//! Storage error type

use sqlx::error::ErrorKind;

use crate::models::ValidationError;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Host unreachable, credentials rejected, handshake failed
    #[error("could not connect to database '{database}': {source}")]
    Connection {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    /// Unique, foreign-key or check constraint violated
    #[error("integrity violation: {message}")]
    Integrity {
        constraint: Option<String>,
        message: String,
    },

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Input rejected before any SQL was issued
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("database error: {0}")]
    Sqlx(sqlx::Error),
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) {
                return Self::Integrity {
                    constraint: db_err.constraint().map(str::to_owned),
                    message: db_err.message().to_owned(),
                };
            }
        }
        Self::Sqlx(err)
    }
}
