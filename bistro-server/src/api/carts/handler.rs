//! Cart API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;
use shared::models::{CartItem, DeleteAck, InsertAck};
use shared::{AppError, AppResult};

use crate::api::extract::ApiJson;
use crate::auth::CurrentUser;
use crate::db::parse_object_id;
use crate::state::AppState;

const RESOURCE: &str = "cart";

#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub email: Option<String>,
}

/// GET /carts?email= - the owner's cart entries
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> AppResult<Json<Vec<CartItem>>> {
    let email = query
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| AppError::required_field("email"))?;
    let items = state.repos.carts.find_by_email(&email).await?;
    Ok(Json(items))
}

/// POST /carts - a missing owner email is taken from the token
pub async fn create(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ApiJson(mut payload): ApiJson<CartItem>,
) -> AppResult<Json<InsertAck>> {
    payload.id = None;
    payload.extra.remove("_id");
    if payload.email.trim().is_empty() {
        payload.email = current_user
            .email
            .ok_or_else(|| AppError::required_field("email"))?;
    }

    let ack = state.repos.carts.insert(payload).await?;
    Ok(Json(ack))
}

/// DELETE /carts/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteAck>> {
    let id = parse_object_id(&id, RESOURCE)?;
    let ack = state.repos.carts.delete(id).await?;
    Ok(Json(ack))
}
