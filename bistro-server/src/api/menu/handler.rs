//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DeleteAck, InsertAck, MenuItem, MenuItemUpdate, UpdateAck};
use shared::{AppError, AppResult, ErrorCode};

use crate::api::extract::ApiJson;
use crate::db::parse_object_id;
use crate::state::AppState;

const RESOURCE: &str = "menu item";

/// GET /menu
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.repos.menu.find_all().await?;
    Ok(Json(items))
}

/// GET /menu/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let id = parse_object_id(&id, RESOURCE)?;
    let item = state
        .repos
        .menu
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::MenuItemNotFound))?;
    Ok(Json(item))
}

/// POST /menu
pub async fn create(
    State(state): State<AppState>,
    ApiJson(mut payload): ApiJson<MenuItem>,
) -> AppResult<Json<InsertAck>> {
    payload.id = None;
    payload.extra.remove("_id");
    let ack = state.repos.menu.insert(payload).await?;
    tracing::info!(menu_id = %ack.inserted_id, "Menu item created");
    Ok(Json(ack))
}

/// PATCH /menu/{id} - overwrite name, category, price, recipe and image
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<MenuItemUpdate>,
) -> AppResult<Json<UpdateAck>> {
    let id = parse_object_id(&id, RESOURCE)?;
    let ack = state.repos.menu.update(id, payload).await?;
    Ok(Json(ack))
}

/// DELETE /menu/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteAck>> {
    let id = parse_object_id(&id, RESOURCE)?;
    let ack = state.repos.menu.delete(id).await?;
    if ack.deleted_count == 0 {
        return Err(AppError::not_found(ErrorCode::MenuItemNotFound));
    }
    tracing::info!(menu_id = %id, "Menu item deleted");
    Ok(Json(ack))
}
