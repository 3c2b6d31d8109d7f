//! API-facing error type: one `thiserror` enum at this crate's
//! boundary, mapping every internal failure kind to an HTTP status.

use aeo_types::AeoError;
use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("job {job_id} not found")]
    JobNotFound { job_id: String },

    #[error("invalid domain {domain}: {message}")]
    InvalidDomain { domain: String, message: String },

    #[error("PDF generation failed: {message}")]
    Pdf { message: String },

    #[error("feature '{feature}' is not enabled in this build")]
    FeatureNotEnabled { feature: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidDomain { .. } => StatusCode::BAD_REQUEST,
            ApiError::JobNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Pdf { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::FeatureNotEnabled { .. } => StatusCode::NOT_IMPLEMENTED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::InvalidDomain { .. } => "invalid_domain",
            ApiError::JobNotFound { .. } => "job_not_found",
            ApiError::Pdf { .. } => "pdf_error",
            ApiError::FeatureNotEnabled { .. } => "feature_not_enabled",
            ApiError::Internal { .. } => "internal_error",
        }
    }
}

impl From<AeoError> for ApiError {
    fn from(err: AeoError) -> Self {
        match err {
            AeoError::JobNotFound { job_id } => ApiError::JobNotFound { job_id },
            AeoError::Pdf { message } => ApiError::Pdf { message },
            AeoError::FeatureNotEnabled { feature } => ApiError::FeatureNotEnabled { feature },
            AeoError::Config { message } => ApiError::Validation { message },
            other => ApiError::Internal { message: other.to_string() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type();
        let message = self.to_string();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error_type, %message, "request failed");
            }
            _ => {
                tracing::warn!(error_type, %message, "request rejected");
            }
        }

        (status, Json(json!({ "error": error_type, "message": message }))).into_response()
    }
}
