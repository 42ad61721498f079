//! Template catalog handler.

use axum::Json;
use axum::extract::State;

use chatforge_core::repository::TemplateRepository;
use chatforge_types::template::Template;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

/// GET /api/templates
pub async fn list(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Vec<Template>>, AppError> {
    let templates = state
        .templates
        .list()
        .await
        .map_err(AppError::Repository)?;
    Ok(Json(templates))
}
