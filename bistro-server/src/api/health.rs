//! Liveness endpoints (public)

use axum::Json;

pub async fn hello() -> &'static str {
    "Hello World!"
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "bistro-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
