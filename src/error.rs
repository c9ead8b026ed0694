//! Error types for the todo API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Storage backend errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

/// HTTP-facing error type. Every failure surfaces synchronously as the
/// response; nothing is retried or swallowed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The path id is not a well-formed object id (distinct from not-found).
    #[error("The requested todo id wasn't a legal Mongo Object ID.")]
    InvalidIdentifier,

    #[error("The requested todo was not found")]
    NotFound,

    /// A query parameter value outside its recognized domain. The message
    /// names the violated constraint.
    #[error("{0}")]
    InvalidParameter(String),

    /// One or more required-field rules violated on creation, in rule order.
    #[error("Todo failed validation")]
    ValidationFailed(Vec<String>),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidIdentifier
            | ApiError::InvalidParameter(_)
            | ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = match &self {
            ApiError::ValidationFailed(violations) => serde_json::json!({
                "message": self.to_string(),
                "violations": violations,
            }),
            _ => serde_json::json!({ "message": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::InvalidIdentifier.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidParameter("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ValidationFailed(vec![]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Store(StoreError::Query("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_parameter_displays_its_message() {
        let err = ApiError::InvalidParameter("The limit must be a number.".into());
        assert_eq!(err.to_string(), "The limit must be a number.");
    }
}
