//! Token API Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::Value;
use shared::{AppError, AppResult};

use crate::api::extract::ApiJson;
use crate::auth::JwtError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /jwt - sign the posted object
pub async fn issue(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Value>,
) -> AppResult<Json<TokenResponse>> {
    let Value::Object(claims) = payload else {
        return Err(AppError::invalid_request("Token payload must be a JSON object"));
    };

    let token = state.jwt.issue(claims).map_err(|e| match e {
        JwtError::InvalidClaims(msg) => AppError::validation(msg),
        other => AppError::internal(other.to_string()),
    })?;

    Ok(Json(TokenResponse { token }))
}
