//! HTTP error handling for the content API
//!
//! Every non-2xx response carries the same envelope:
//! `{timestamp, status, error, message, details}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use contentspace_core::ContentServiceError;
use serde::{Deserialize, Serialize};

/// Error envelope written to the response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    /// Short label for the failure class
    pub error: String,
    pub message: String,
    pub details: Vec<String>,
}

/// Error returned by content handlers
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
    pub details: Vec<String>,
}

impl HttpError {
    /// 400 with one message per failed field
    pub fn validation(details: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Validation Failed",
            message: "Invalid input data".to_string(),
            details,
        }
    }

    /// 404 for an unknown content id
    pub fn not_found(id: &str) -> Self {
        let message = format!("Content not found with id: {}", id);
        Self {
            status: StatusCode::NOT_FOUND,
            error: "Not Found",
            details: vec![message.clone()],
            message,
        }
    }

    /// 500 carrying the underlying cause
    pub fn internal(cause: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "Server Error",
            message: "An unexpected error occurred".to_string(),
            details: vec![cause.into()],
        }
    }

    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse {
            timestamp: Utc::now(),
            status: self.status.as_u16(),
            error: self.error.to_string(),
            message: self.message.clone(),
            details: self.details.clone(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.to_body())).into_response()
    }
}

impl From<ContentServiceError> for HttpError {
    fn from(err: ContentServiceError) -> Self {
        match err {
            ContentServiceError::Validation(e) => HttpError::validation(vec![e.to_string()]),
            ContentServiceError::Store { .. } => {
                tracing::error!("❌ Content store failure: {}", err);
                HttpError::internal(err.to_string())
            }
        }
    }
}
