//! Error types of the score service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::protocol::ErrorResponse;

/// Why a submission body was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("playerName, playerEmail and score are required")]
    MissingFields,
    #[error("playerName must be a non-empty string")]
    InvalidName,
    #[error("playerName must be at most 50 characters")]
    NameTooLong,
    #[error("please provide a valid email address")]
    InvalidEmail,
    #[error("playerEmail must be at most 100 characters")]
    EmailTooLong,
    #[error("score must be an integer between 0 and 999999")]
    InvalidScore,
}

/// Failures of [`crate::ScoreStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("please wait 5 minutes between score submissions")]
    RateLimited { retry_after_ms: u64 },
    #[error("score store is full ({capacity} entries)")]
    Full { capacity: usize },
}

/// Anything a handler can fail with, mapped onto an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid JSON body: {0}")]
    BadJson(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Route not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::RateLimited { .. }) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Store(StoreError::Full { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
