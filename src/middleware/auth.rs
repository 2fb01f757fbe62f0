//! # Admin Session Middleware
//!
//! Gates every admin route on the shared-secret session cookie before any
//! other validation runs. When no admin password is configured the gate is
//! deliberately open (documented "open mode" behavior for local setups,
//! not a bug).

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{instrument, trace, warn};

use crate::error::AppError;
use crate::models::AppState;
use crate::utils::constant::ADMIN_COOKIE;

/// Admin authentication middleware.
///
/// # Returns
///
/// - **Success**: Continues to the next handler
/// - **Failure**: `401 Unauthorized` when the session cookie is missing or
///   does not match the configured secret
#[instrument(
    skip_all,
    fields(
        method = %req.method(),
        uri = %req.uri(),
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn admin_auth_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = &state.admin_password else {
        trace!("Open mode, skipping admin session check");
        return Ok(next.run(req).await);
    };

    let token = req
        .headers()
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| cookie_value(cookies, ADMIN_COOKIE));

    match token {
        Some(token) if token == expected => {
            trace!("Admin session validated");
            Ok(next.run(req).await)
        }
        Some(_) => {
            warn!("Admin session cookie mismatch");
            Err(AppError::Unauthorized("Unauthorized"))
        }
        None => {
            warn!("Missing admin session cookie");
            Err(AppError::Unauthorized("Unauthorized"))
        }
    }
}

/// Extracts a cookie's value from a `Cookie` header string.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_cookie_among_others() {
        let header = "theme=dark; guffs_admin=s3cret; lang=en";
        assert_eq!(cookie_value(header, "guffs_admin"), Some("s3cret"));
    }

    #[test]
    fn missing_cookie_is_none() {
        assert_eq!(cookie_value("theme=dark", "guffs_admin"), None);
        assert_eq!(cookie_value("", "guffs_admin"), None);
    }

    #[test]
    fn name_must_match_exactly() {
        assert_eq!(cookie_value("xguffs_admin=nope", "guffs_admin"), None);
    }
}
