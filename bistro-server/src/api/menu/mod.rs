//! Menu API module
//!
//! Reads are public; every write goes through the admin gate.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::{require_admin, require_auth};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let read_routes = Router::new()
        .route("/menu", get(handler::list))
        .route("/menu/{id}", get(handler::get_by_id));

    let write_routes = Router::new()
        .route("/menu", post(handler::create))
        .route("/menu/{id}", patch(handler::update).delete(handler::delete))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    read_routes.merge(write_routes)
}
