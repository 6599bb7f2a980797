use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// Upstream answered with a client error; repeating the call cannot help
    #[error("Upstream rejected request: {0}")]
    UpstreamRejected(String),

    /// No obstacle-free route exists between origin and destination
    #[error("No route found: {0}")]
    NoRoute(String),

    /// Report submission failed downstream (store or adapter). Kept as its
    /// own variant because the submit endpoint answers 504 with a fixed
    /// apology string, matching the client's expectations.
    #[error("Report submission failed: {0}")]
    SubmissionFailed(String),
}

impl AppError {
    /// Whether retrying the operation has any chance of a different outcome.
    /// Only transport failures and upstream 5xx answers qualify.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::ExternalServiceError(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::ExternalServiceError(ref msg) => {
                tracing::error!("External service error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone(), None)
            }
            AppError::UpstreamRejected(ref msg) => {
                tracing::error!("Upstream rejected request: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone(), None)
            }
            AppError::NoRoute(ref msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone(), None),
            AppError::SubmissionFailed(ref msg) => {
                tracing::error!("Report submission failed: {}", msg);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "something went wrong with your report".to_string(),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_route_maps_to_422() {
        let response = AppError::NoRoute("blocked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_submission_failure_maps_to_504() {
        let response = AppError::SubmissionFailed("store down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_external_service_maps_to_502() {
        let response = AppError::ExternalServiceError("upstream".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::UpstreamRejected("404".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_only_external_service_errors_are_transient() {
        assert!(AppError::ExternalServiceError("timeout".to_string()).is_transient());
        assert!(!AppError::UpstreamRejected("404".to_string()).is_transient());
        assert!(!AppError::Validation("bad input".to_string()).is_transient());
    }
}
