//! Profile handlers.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::json;

use chatforge_types::user::{UserPatch, UserProfile};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordPayload {
    pub current_password: String,
    pub new_password: String,
}

/// GET /api/profile
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<UserProfile>, AppError> {
    let user = state.account_service.get(current.id).await?;
    Ok(Json(user.profile()))
}

/// PATCH /api/profile
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<UserProfile>, AppError> {
    if let Some(email) = &payload.email
        && !email.contains('@')
    {
        return Err(AppError::Validation("a valid email is required".to_string()));
    }

    let user = state
        .account_service
        .update_profile(
            current.id,
            UserPatch {
                email: payload.email,
                full_name: payload.full_name,
                avatar_url: payload.avatar_url,
                password_hash: None,
            },
        )
        .await?;
    Ok(Json(user.profile()))
}

/// PATCH /api/profile/password
pub async fn change_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<PasswordPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.new_password.is_empty() {
        return Err(AppError::Validation("new password is required".to_string()));
    }

    state
        .account_service
        .change_password(current.id, &payload.current_password, &payload.new_password)
        .await?;
    Ok(Json(json!({ "message": "Password updated successfully" })))
}
