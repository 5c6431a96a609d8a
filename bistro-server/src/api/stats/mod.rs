//! Dashboard statistics API module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{require_admin, require_auth};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/admin-stats", get(handler::admin_stats))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
}
