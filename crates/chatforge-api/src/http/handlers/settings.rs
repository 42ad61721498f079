//! Settings handlers.
//!
//! Each PATCH takes a full section object: sections are atomic and
//! replaced wholesale, never merged field by field.

use axum::Json;
use axum::extract::State;

use chatforge_types::settings::{
    ApiSettings, AppearanceSettings, NotificationSettings, UserSettings,
};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

/// GET /api/settings
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<UserSettings>, AppError> {
    let settings = state
        .settings_service
        .get_or_create(current.id)
        .await
        .map_err(AppError::Repository)?;
    Ok(Json(settings))
}

/// PATCH /api/settings/api
pub async fn update_api(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(section): Json<ApiSettings>,
) -> Result<Json<UserSettings>, AppError> {
    let settings = state
        .settings_service
        .update_api(current.id, section)
        .await
        .map_err(AppError::Repository)?;
    Ok(Json(settings))
}

/// PATCH /api/settings/notifications
pub async fn update_notifications(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(section): Json<NotificationSettings>,
) -> Result<Json<UserSettings>, AppError> {
    let settings = state
        .settings_service
        .update_notifications(current.id, section)
        .await
        .map_err(AppError::Repository)?;
    Ok(Json(settings))
}

/// PATCH /api/settings/appearance
pub async fn update_appearance(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(section): Json<AppearanceSettings>,
) -> Result<Json<UserSettings>, AppError> {
    let settings = state
        .settings_service
        .update_appearance(current.id, section)
        .await
        .map_err(AppError::Repository)?;
    Ok(Json(settings))
}
