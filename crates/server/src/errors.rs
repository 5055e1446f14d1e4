use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use models::errors::ModelError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error returned by every route handler, rendered as [`ErrorBody`].
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, error: error.into(), detail }
    }

    pub fn bad_request(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, Some(detail.into()))
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error, None)
    }

    pub fn internal(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error, Some(detail.into()))
    }

    /// Map a service failure: a missing row answers `not_found`, anything
    /// else is a 500 carrying the underlying message.
    pub fn from_service(err: ServiceError, not_found: &str, failure: &str) -> Self {
        match err {
            ServiceError::NotFound(_) => Self::not_found(not_found),
            ServiceError::Db(ref msg) => {
                error!(err = %msg, "{failure}");
                Self::internal(failure, err.to_string())
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.error, detail: self.detail };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Invalid Request Body", rejection.body_text())
    }
}

impl From<ModelError> for JsonApiError {
    fn from(err: ModelError) -> Self {
        Self::bad_request("Validation Error", err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_no_detail() {
        let err = JsonApiError::from_service(ServiceError::not_found("column"), "Column not found", "Fetch Failed");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.error, "Column not found");
        assert!(err.detail.is_none());
    }

    #[test]
    fn store_failure_is_internal_with_detail() {
        let err = JsonApiError::from_service(ServiceError::Db("connection reset".into()), "Task not found", "Update Failed");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, "Update Failed");
        assert!(err.detail.unwrap().contains("connection reset"));
    }

    #[test]
    fn validation_is_bad_request() {
        let err: JsonApiError = ModelError::Validation("title is required".into()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.detail.as_deref(), Some("validation error: title is required"));
    }
}
