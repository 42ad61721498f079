//! Dashboard handler.

use axum::Json;
use axum::extract::State;

use chatforge_core::service::analytics::DashboardSummary;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

/// GET /api/dashboard
pub async fn summary(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = state
        .analytics_service
        .dashboard(current.id)
        .await
        .map_err(AppError::Repository)?;
    Ok(Json(summary))
}
