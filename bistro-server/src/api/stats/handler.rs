//! Statistics API Handlers

use axum::{Json, extract::State};
use shared::AppResult;
use shared::models::AdminStats;

use crate::state::AppState;

/// GET /admin-stats - estimated user and menu item counts
pub async fn admin_stats(State(state): State<AppState>) -> AppResult<Json<AdminStats>> {
    let users = state.repos.users.estimated_count().await?;
    let menu_item = state.repos.menu.estimated_count().await?;
    Ok(Json(AdminStats { users, menu_item }))
}
