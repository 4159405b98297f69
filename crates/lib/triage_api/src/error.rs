//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use triage_core::analysis::AnalysisError;
use triage_core::webhook::ForwardError;

/// Message returned for any forwarding failure.
pub const UPSTREAM_FAILURE: &str = "Failed to connect to service";

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body unparseable, webhook unreachable, or webhook reply
    /// unusable. The cause is logged, never returned.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, m.as_str()),
            AppError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE),
            AppError::Analysis(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.as_str()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<ForwardError> for AppError {
    fn from(e: ForwardError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        AppError::Analysis(e.to_string())
    }
}
