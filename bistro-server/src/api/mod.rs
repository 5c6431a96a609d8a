//! HTTP API
//!
//! One module per resource, each exposing a `router()` with its guards
//! already layered on.

pub mod extract;
pub mod health;

mod carts;
mod menu;
mod reviews;
mod stats;
mod token;
mod users;

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::get;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::middleware::{REQUEST_ID_HEADER, logging_middleware};
use crate::state::AppState;

/// UUID v4 request ids
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, guards included, without the outer middleware
pub fn build_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(health::hello))
        .route("/health", get(health::health_check))
        .merge(token::router())
        .merge(users::router(state))
        .merge(menu::router(state))
        .merge(reviews::router())
        .merge(carts::router(state))
        .merge(stats::router(state))
}

/// The full application served by `main` and driven by the router tests
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router(&state)
        // Request logging - runs after the id is assigned
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
