//! Authentication handlers: register, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use chatforge_core::service::account::RegisterRequest;
use chatforge_types::session::SessionToken;
use chatforge_types::user::UserProfile;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

/// Session token plus the public user view, returned by register/login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: SessionToken,
    pub user: UserProfile,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let username = payload.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::Validation("username is required".to_string()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("password is required".to_string()));
    }
    if !payload.email.contains('@') {
        return Err(AppError::Validation("a valid email is required".to_string()));
    }

    let (user, _subscription) = state
        .account_service
        .register(RegisterRequest {
            username,
            password: payload.password,
            email: payload.email,
        })
        .await?;

    let token = state.sessions.issue(user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.profile(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state
        .account_service
        .login(&payload.username, &payload.password)
        .await?;

    let token = state.sessions.issue(user.id);

    Ok(Json(AuthResponse {
        token,
        user: user.profile(),
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Json<serde_json::Value> {
    state.sessions.revoke(current.token);
    Json(json!({ "message": "Logged out successfully" }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<UserProfile>, AppError> {
    let user = state.account_service.get(current.id).await?;
    Ok(Json(user.profile()))
}
