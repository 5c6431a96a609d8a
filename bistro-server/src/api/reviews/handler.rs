//! Review API Handlers

use axum::{Json, extract::State};
use shared::AppResult;
use shared::models::Review;

use crate::state::AppState;

/// GET /reviews
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.repos.reviews.find_all().await?;
    Ok(Json(reviews))
}
