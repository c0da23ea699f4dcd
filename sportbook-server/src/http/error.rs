//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Every body carries an `error` kind and a human-readable `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Body or path could not be parsed (400)
    BadRequest { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Constraint violation in storage (409)
    Conflict { message: String },

    /// Database unreachable (503, logged)
    Unavailable(DbError),

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "bad_request",
                    "message": message
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Conflict { message } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "integrity_error",
                    "message": message
                }),
            ),
            Self::Unavailable(e) => {
                tracing::error!("Database unavailable: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({
                        "error": "unavailable",
                        "message": "database is unavailable"
                    }),
                )
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Invalid(v) => Self::Validation(v),
            DbError::Integrity { message, .. } => Self::Conflict { message },
            DbError::Connection { .. } => Self::Unavailable(e),
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Missing { field: "email" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "missing required field 'email'");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = ApiError::not_found("user", 9999).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "user '9999' not found");
    }

    #[tokio::test]
    async fn integrity_is_409() {
        let err: ApiError = DbError::Integrity {
            constraint: Some("users_email_key".into()),
            message: "duplicate key value violates unique constraint".into(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["error"], "integrity_error");
    }

    #[tokio::test]
    async fn empty_patch_from_repo_is_400() {
        let err: ApiError = DbError::Invalid(ValidationError::NothingToUpdate).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn connection_failure_is_503() {
        let err: ApiError = DbError::Connection {
            database: "sportbook".into(),
            source: sqlx::Error::PoolTimedOut,
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
