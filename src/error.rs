//! Application error type and its HTTP mapping.
//!
//! Every failure surfaced to a client is one of three kinds:
//!
//! - [`AppError::InvalidInput`] - 400, the caller must fix the request
//! - [`AppError::NotFound`] - 404, unknown short code
//! - [`AppError::Storage`] - 500, transient storage failure (connectivity,
//!   timeout, unresolved uniqueness conflict)
//!
//! Storage failures are logged server-side and rendered with a generic message;
//! their detail never reaches the response body.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

/// Message returned to clients for every storage failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Message returned when a request body is not usable JSON.
pub const INVALID_BODY_MESSAGE: &str = "Invalid JSON body";

/// JSON error payload: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("storage failure: {message}")]
    Storage { message: String },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Storage detail is replaced by [`SERVER_ERROR_MESSAGE`].
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput { message } | AppError::NotFound { message } => message.clone(),
            AppError::Storage { .. } => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Storage { message } = &self {
            tracing::error!(error = %message, "Request failed with storage error");
        }

        let body = ErrorBody {
            error: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::storage(format!("database error: {e}"))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected JSON body");
        AppError::invalid_input(INVALID_BODY_MESSAGE)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid input".to_string());

        AppError::invalid_input(message)
    }
}
