//! REST error contract.
//!
//! Every failure surfaces as a JSON `{"error": "..."}` body with an HTTP
//! status: 400 invalid input, 404 unknown supplier, 422 invalid
//! extraction, 500 config/upstream/storage failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ingestion::IngestError;
use serde_json::json;
use thiserror::Error;

/// API-level error mapped onto the HTTP status contract.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The model's output failed schema validation (422).
    #[error("{0}")]
    InvalidExtraction(String),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidExtraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::InvalidUrl { .. } => ApiError::BadRequest(err.to_string()),
            IngestError::InvalidExtraction(_) => ApiError::InvalidExtraction(err.to_string()),
            // Fetch, HTTP, AI and config failures are upstream errors
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidExtraction("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_ingest_error_mapping() {
        let err: ApiError = IngestError::InvalidExtraction("bad shape".into()).into();
        assert!(matches!(err, ApiError::InvalidExtraction(_)));

        let err: ApiError = IngestError::Fetch {
            url: "https://x.example".into(),
            status: 503,
        }
        .into();
        assert!(matches!(err, ApiError::Internal(_)));

        let err: ApiError = IngestError::InvalidUrl {
            url: "not a url".into(),
        }
        .into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
