//! # Health Check Handler
//!
//! Simple health check endpoint for monitoring application availability.

use axum::http::StatusCode;
use tracing::{debug, instrument};

/// Health check endpoint that returns 200 OK.
#[instrument]
pub async fn health_check() -> StatusCode {
    debug!("Health check endpoint accessed");
    StatusCode::OK
}
