//! Session-token authentication extractor.
//!
//! Extracts the opaque session token from:
//! - `Authorization: Bearer <token>` header
//! - `X-Session-Token: <token>` header
//!
//! The token must resolve through the session store to a user that
//! still exists; anything else is a 401 before the handler runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use chatforge_core::repository::UserRepository;
use chatforge_types::session::SessionToken;
use chatforge_types::user::UserId;

use crate::http::error::AppError;
use crate::state::AppState;

/// The authenticated caller. Extracting this validates the session.
pub struct CurrentUser {
    pub id: UserId,
    /// The presented token, kept so logout can revoke it.
    pub token: SessionToken,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;

        let user_id = state
            .sessions
            .resolve(token)
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

        // The session must still point at a live user record.
        let user = state
            .users
            .get(user_id)
            .await
            .map_err(AppError::Repository)?;
        if user.is_none() {
            return Err(AppError::Unauthorized("User not found".to_string()));
        }

        Ok(CurrentUser { id: user_id, token })
    }
}

/// Pull the session token out of the request headers.
fn extract_token(parts: &Parts) -> Result<SessionToken, AppError> {
    let raw = raw_token(parts)?;
    raw.parse()
        .map_err(|_| AppError::Unauthorized("Invalid session token".to_string()))
}

fn raw_token(parts: &Parts) -> Result<String, AppError> {
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    if let Some(token) = parts.headers.get("x-session-token") {
        let token_str = token.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid X-Session-Token header encoding".to_string())
        })?;
        return Ok(token_str.trim().to_string());
    }

    Err(AppError::Unauthorized(
        "Not authenticated. Provide a session token via 'Authorization: Bearer <token>' or \
         'X-Session-Token: <token>' header."
            .to_string(),
    ))
}
