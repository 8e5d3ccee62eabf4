//! API error types.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use formcheck_analysis::AnalysisError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Analysis(e) => match e {
                AnalysisError::UnsupportedExercise { .. } | AnalysisError::InvalidInput(_) => {
                    StatusCode::BAD_REQUEST
                }
                AnalysisError::NoValidFrames { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn code(&self) -> Option<&'static str> {
        match self {
            ApiError::Analysis(e) => Some(e.stage()),
            _ => None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let detail = if status.is_server_error() {
            warn!(status = status.as_u16(), "Request failed: {}", self);
            if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                "An internal error occurred".to_string()
            } else {
                self.to_string()
            }
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            detail,
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_status() {
        let unsupported: ApiError =
            AnalysisError::unsupported_exercise("bench-press", &["squat", "deadlift"]).into();
        assert_eq!(unsupported.status_code(), StatusCode::BAD_REQUEST);

        let empty: ApiError = AnalysisError::NoValidFrames { sampled: 8 }.into();
        assert_eq!(empty.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let cancelled: ApiError = AnalysisError::Cancelled.into();
        assert_eq!(cancelled.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_analysis_error_detail_is_unprefixed() {
        let err: ApiError =
            AnalysisError::unsupported_exercise("bench-press", &["squat", "deadlift"]).into();
        let detail = err.to_string();
        assert!(detail.contains("bench-press"));
        assert!(detail.contains("squat, deadlift"));
        assert_eq!(err.code(), Some("configuration"));
    }
}
