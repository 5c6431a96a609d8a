//! Authentication middleware
//!
//! [`require_auth`] verifies the bearer token and stores a [`CurrentUser`] in
//! the request extensions. [`require_admin`] must run after it and checks the
//! stored user's role on every request.
//!
//! | Failure | Status |
//! |---------|--------|
//! | No Authorization header | 401 |
//! | Malformed header, bad signature, expired token | 401 |
//! | No email claim, user missing, role not admin | 403 |
//! | Store failure during the role lookup | 500 |

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::AppError;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::security_log;
use crate::state::AppState;

/// Authentication middleware - requires a valid bearer token
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => match JwtService::extract_from_header(header) {
            Some(token) => token,
            None => {
                security_log!("WARN", "auth_malformed", uri = req.uri().to_string());
                return Err(AppError::invalid_token());
            }
        },
        None => {
            security_log!("WARN", "auth_missing", uri = req.uri().to_string());
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt.validate(token) {
        Ok(claims) => {
            req.extensions_mut().insert(CurrentUser::from(claims));
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().to_string()
            );
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}

/// Admin middleware - the token's email must belong to a stored admin
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let email = req
        .extensions()
        .get::<CurrentUser>()
        .and_then(|user| user.email.clone());

    let Some(email) = email else {
        security_log!("WARN", "admin_no_identity", uri = req.uri().to_string());
        return Err(AppError::admin_required());
    };

    let is_admin = state
        .repos
        .users
        .find_by_email(&email)
        .await?
        .is_some_and(|user| user.is_admin());

    if !is_admin {
        security_log!(
            "WARN",
            "admin_required",
            email = email,
            uri = req.uri().to_string()
        );
        return Err(AppError::admin_required());
    }

    Ok(next.run(req).await)
}
