//! # Centralized Error Handling
//!
//! This module provides a unified error handling system for the application.
//! It centralizes error logging and HTTP response generation, eliminating
//! repetitive error handling patterns throughout the codebase.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::db::DbError;
use crate::services::ingest::IngestError;
use crate::services::validate::ValidationError;
use crate::storage::StorageError;

/// Central application error type that encompasses all possible error conditions.
///
/// Infrastructure errors (database, blob storage) are logged automatically with
/// full detail when converted into a response; clients only ever see a generic
/// message for them. Client input errors carry their specific, user-displayable
/// message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error")]
    Db(#[from] DbError),

    #[error("storage error")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("bad request: {0}")]
    BadRequest(&'static str),

    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Db(e) => error!(?e, "Database error occurred"),
            AppError::Storage(e) => error!(?e, "Storage error occurred"),
            _ => {}
        }

        let (status, message) = match self {
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Storage error"),
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.message()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(ErrorBody { message });
        (status, body).into_response()
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Validation(e) => AppError::Validation(e),
            IngestError::Heic(_) => {
                AppError::BadRequest(crate::services::heic::HEIC_DECODE_USER_MESSAGE)
            }
            IngestError::Image(e) => {
                error!(?e, "Image decode/encode failed");
                AppError::BadRequest("Could not read image file.")
            }
            IngestError::Storage(e) => AppError::Storage(e),
        }
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;
