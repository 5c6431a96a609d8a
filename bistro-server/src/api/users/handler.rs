//! User API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use shared::models::{AdminStatus, DeleteAck, UpdateAck, User, UserCreated};
use shared::{AppError, AppResult};

use crate::api::extract::ApiJson;
use crate::auth::CurrentUser;
use crate::db::{RepoError, parse_object_id};
use crate::security_log;
use crate::state::AppState;

const RESOURCE: &str = "user";

/// GET /users/admin/{email} - whether the caller is an admin
pub async fn admin_status(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(email): Path<String>,
) -> AppResult<Json<AdminStatus>> {
    if current_user.email.as_deref() != Some(email.as_str()) {
        security_log!(
            "WARN",
            "identity_mismatch",
            requested = email,
            token_email = current_user.email.unwrap_or_default()
        );
        return Err(AppError::identity_mismatch());
    }

    let admin = state
        .repos
        .users
        .find_by_email(&email)
        .await?
        .is_some_and(|user| user.is_admin());
    Ok(Json(AdminStatus { admin }))
}

/// GET /user - all users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.repos.users.find_all().await?;
    Ok(Json(users))
}

/// POST /user - register; a known email is a no-op
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<User>,
) -> AppResult<Json<UserCreated>> {
    if payload.email.trim().is_empty() {
        return Err(AppError::required_field("email"));
    }

    if state
        .repos
        .users
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Ok(Json(UserCreated::already_exists()));
    }

    // A concurrent registration can win between the lookup and the insert
    match state.repos.users.insert(payload.into_registration()).await {
        Ok(ack) => {
            tracing::info!(user_id = %ack.inserted_id, "User registered");
            Ok(Json(UserCreated::Inserted(ack)))
        }
        Err(RepoError::Duplicate(_)) => Ok(Json(UserCreated::already_exists())),
        Err(e) => Err(e.into()),
    }
}

/// PATCH /user/admin/{id} - grant the admin role
pub async fn promote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UpdateAck>> {
    let id = parse_object_id(&id, RESOURCE)?;
    let ack = state.repos.users.set_admin_role(id).await?;
    tracing::info!(user_id = %id, upserted = ack.upserted_count > 0, "Admin role granted");
    Ok(Json(ack))
}

/// DELETE /user/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteAck>> {
    let id = parse_object_id(&id, RESOURCE)?;
    let ack = state.repos.users.delete(id).await?;
    Ok(Json(ack))
}
