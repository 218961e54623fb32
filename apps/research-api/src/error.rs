//! Error types for the research API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bias_checker::BiasError;
use research_stats::StatsError;
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Classifier timeout after {0}ms")]
    Timeout(u64),

    #[error("Classifier failed: {0}")]
    ClassifierFailed(String),

    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::Timeout(ms) => (
                StatusCode::GATEWAY_TIMEOUT,
                "TIMEOUT",
                format!("Classifier did not answer within {}ms", ms),
            ),
            ServerError::ClassifierFailed(msg) => {
                tracing::warn!("Classifier failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "CLASSIFIER_FAILED",
                    "Bias classifier request failed".to_string(),
                )
            }
            ServerError::ClassifierUnavailable(msg) => {
                tracing::error!("Classifier unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CLASSIFIER_UNAVAILABLE",
                    "Bias classifier is not available".to_string(),
                )
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StatsError> for ServerError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::InvalidArgument(msg) => ServerError::InvalidRequest(msg),
        }
    }
}

impl From<BiasError> for ServerError {
    fn from(err: BiasError) -> Self {
        match err {
            BiasError::Unavailable(msg) => ServerError::ClassifierUnavailable(msg),
            other => ServerError::ClassifierFailed(other.to_string()),
        }
    }
}
