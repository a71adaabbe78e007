/*
 * Responsibility
 * - AppError shared by every handler and middleware
 * - IntoResponse (HTTP status / JSON error body)
 * - one place where forum (domain) errors become HTTP statuses
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::forum::ForumError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("required parameters were missing from this API call: {}", .0.join(", "))]
    ParamsMissing(Vec<&'static str>),
    #[error("{0}")]
    BadRequest(String),
    #[error("not authorised")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("{resource} not found.")]
    NotFound { resource: &'static str },
    #[error("request body too large")]
    PayloadTooLarge,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn params_missing(fields: &[&'static str]) -> Self {
        Self::ParamsMissing(fields.to_vec())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ParamsMissing(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::ParamsMissing(_) => "params-missing",
            AppError::BadRequest(_) => "bad-request",
            AppError::Unauthorized => "not-authorised",
            AppError::Forbidden => "forbidden",
            AppError::NotFound { .. } => "not-found",
            AppError::PayloadTooLarge => "payload-too-large",
            AppError::Internal => "internal-server-error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ForumError> for AppError {
    fn from(e: ForumError) -> Self {
        match e {
            ForumError::NoPrivileges => AppError::Forbidden,
            ForumError::NotFound(resource) => AppError::not_found(resource),
            ForumError::Invalid(message) => AppError::BadRequest(message),
            ForumError::Backend(err) => {
                // Backend details stay in the log, never in the response body.
                tracing::error!(error = ?err, "forum backend failure");
                AppError::Internal
            }
        }
    }
}
