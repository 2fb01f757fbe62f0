//! # Admin Login / Logout
//!
//! Session handling is a shared-secret compare: a matching password sets a
//! multi-day httpOnly cookie whose value the admin middleware checks on
//! every gated route. In open mode (no password configured) login always
//! succeeds and no cookie is needed.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::models::AppState;
use crate::utils::constant::{ADMIN_COOKIE, SESSION_MAX_AGE_SECS};

#[derive(Deserialize)]
pub struct LoginBody {
    password: String,
}

/// POST /api/admin/login
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> AppResult<Response> {
    let mut response = Json(json!({ "ok": true })).into_response();

    if let Some(expected) = &state.admin_password {
        if body.password != *expected {
            warn!("Admin login attempt with wrong password");
            return Err(AppError::Unauthorized("Invalid password"));
        }

        let cookie = format!(
            "{ADMIN_COOKIE}={expected}; HttpOnly; Path=/; Max-Age={SESSION_MAX_AGE_SECS}; SameSite=Lax"
        );
        response.headers_mut().insert(
            header::SET_COOKIE,
            HeaderValue::from_str(&cookie).map_err(|_| AppError::Internal)?,
        );
        info!("Admin session established");
    }

    Ok(response)
}

/// POST /api/admin/logout
#[instrument(skip_all)]
pub async fn logout() -> AppResult<Response> {
    let mut response = Json(json!({ "ok": true })).into_response();

    let cookie = format!("{ADMIN_COOKIE}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax");
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|_| AppError::Internal)?,
    );

    Ok(response)
}
