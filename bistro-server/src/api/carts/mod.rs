//! Cart API module
//!
//! Every cart route requires a valid token.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get},
};

use crate::auth::require_auth;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/carts", get(handler::list).post(handler::create))
        .route("/carts/{id}", delete(handler::delete))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
}
