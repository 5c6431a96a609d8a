//! User API module
//!
//! | Path | Method | Guard |
//! |------|--------|-------|
//! | /user | POST | none |
//! | /users/admin/{email} | GET | token, email must match |
//! | /user | GET | admin |
//! | /user/admin/{id} | PATCH | admin |
//! | /user/{id} | DELETE | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::auth::{require_admin, require_auth};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let public_routes = Router::new().route("/user", post(handler::create));

    let token_routes = Router::new()
        .route("/users/admin/{email}", get(handler::admin_status))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Outer layer runs first: token, then role
    let admin_routes = Router::new()
        .route("/user", get(handler::list))
        .route("/user/admin/{id}", patch(handler::promote))
        .route("/user/{id}", delete(handler::delete))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public_routes.merge(token_routes).merge(admin_routes)
}
