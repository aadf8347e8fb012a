// Handler-boundary error taxonomy. Every failure becomes a status code plus {"error": "..."}.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::camera::CameraError;
use crate::moonraker::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Printer host not set.
    #[error("Printer host is not configured")]
    ConfigurationMissing,

    #[error("{0}")]
    UpstreamUnreachable(String),

    #[error("{0}")]
    UpstreamTimeout(String),

    /// Relays the upstream status code.
    #[error("Upstream returned HTTP {status}")]
    UpstreamBadStatus { status: u16 },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unreachable(msg) => {
                AppError::UpstreamUnreachable(format!("Printer is unreachable: {}", msg))
            }
            UpstreamError::Timeout(_) => {
                AppError::UpstreamTimeout("Request to printer timed out".into())
            }
            UpstreamError::BadStatus { status } => AppError::UpstreamBadStatus { status },
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::NotFound(err.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ConfigurationMissing => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamBadStatus { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
