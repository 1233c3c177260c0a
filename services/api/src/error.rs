//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed request data
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Credentials did not match
    #[error("Unauthorized")]
    Unauthorized,

    /// The addressed document does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request clashes with an existing document
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    /// Map a repository failure, keeping storage errors typed
    pub fn from_store(err: anyhow::Error) -> Self {
        let err = match err.downcast::<DatabaseError>() {
            Ok(db) => return ApiError::Database(db),
            Err(err) => err,
        };
        match err.downcast::<sqlx::Error>() {
            Ok(query) => ApiError::Database(DatabaseError::Query(query)),
            Err(_) => ApiError::InternalServerError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Conflict(msg) => msg,
            ApiError::Unauthorized => "Invalid credentials".to_string(),
            ApiError::InternalServerError => "Internal server error".to_string(),
            ApiError::Database(_) => "Database error".to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(DatabaseError::Unavailable).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_store_keeps_database_errors() {
        let unavailable = ApiError::from_store(DatabaseError::Unavailable.into());
        assert!(matches!(
            unavailable,
            ApiError::Database(DatabaseError::Unavailable)
        ));

        let query = ApiError::from_store(sqlx::Error::RowNotFound.into());
        assert!(matches!(
            query,
            ApiError::Database(DatabaseError::Query(sqlx::Error::RowNotFound))
        ));

        let other = ApiError::from_store(anyhow::anyhow!("duplicate username"));
        assert!(matches!(other, ApiError::InternalServerError));
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = ApiError::NotFound("Exam folder not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
