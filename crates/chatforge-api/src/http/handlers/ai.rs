//! AI utility handlers: persona generation, embeddings, model listing.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use chatforge_core::llm::CompletionService;
use chatforge_types::llm::ModelInfo;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PersonaPayload {
    pub industry: String,
    pub tone: String,
    pub purpose: String,
}

#[derive(Debug, Serialize)]
pub struct PersonaResponse {
    pub persona: String,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingPayload {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
}

/// POST /api/generate/persona
pub async fn generate_persona(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(payload): Json<PersonaPayload>,
) -> Result<Json<PersonaResponse>, AppError> {
    if payload.industry.trim().is_empty()
        || payload.tone.trim().is_empty()
        || payload.purpose.trim().is_empty()
    {
        return Err(AppError::Validation(
            "industry, tone, and purpose are required".to_string(),
        ));
    }

    let persona = state
        .conversation_service
        .generate_persona(&payload.industry, &payload.tone, &payload.purpose)
        .await?;
    Ok(Json(PersonaResponse { persona }))
}

/// POST /api/embeddings
pub async fn embed(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(payload): Json<EmbeddingPayload>,
) -> Result<Json<EmbeddingResponse>, AppError> {
    if payload.text.trim().is_empty() {
        return Err(AppError::Validation("text is required".to_string()));
    }

    let embedding = state.completion.embed(&payload.text).await?;
    Ok(Json(EmbeddingResponse { embedding }))
}

/// GET /api/ai/models
pub async fn list_models(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Vec<ModelInfo>>, AppError> {
    let models = state.completion.list_models().await?;
    Ok(Json(models))
}
