//! Analytics handler.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use chatforge_core::service::analytics::{AnalyticsReport, TimeRange};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub time_range: Option<String>,
}

/// GET /api/analytics?time_range=7d|30d|90d|365d
pub async fn report(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let range = match query.time_range.as_deref() {
        Some(raw) => raw.parse::<TimeRange>().map_err(AppError::Validation)?,
        None => TimeRange::default(),
    };

    let report = state
        .analytics_service
        .report(current.id, range)
        .await
        .map_err(AppError::Repository)?;
    Ok(Json(report))
}
