//! Billing handlers: overview and plan upgrades.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use chatforge_core::service::billing::BillingOverview;
use chatforge_types::subscription::Subscription;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpgradePayload {
    pub plan_id: String,
}

/// GET /api/billing
pub async fn overview(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<BillingOverview>, AppError> {
    let overview = state.billing_service.overview(current.id).await?;
    Ok(Json(overview))
}

/// POST /api/billing/upgrade
pub async fn upgrade(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<UpgradePayload>,
) -> Result<Json<Subscription>, AppError> {
    if payload.plan_id.trim().is_empty() {
        return Err(AppError::Validation("plan_id is required".to_string()));
    }

    let subscription = state
        .billing_service
        .upgrade(current.id, &payload.plan_id)
        .await?;
    Ok(Json(subscription))
}
