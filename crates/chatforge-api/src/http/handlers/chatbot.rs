//! Chatbot CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use chatforge_core::repository::ConversationRepository;
use chatforge_types::chatbot::{Chatbot, ChatbotId, ChatbotPatch, ChatbotStatus, NewChatbot};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

/// Listing row: the full configuration is only returned by the detail
/// route.
#[derive(Debug, Serialize)]
pub struct ChatbotSummary {
    pub id: ChatbotId,
    pub name: String,
    pub flows: usize,
    pub status: ChatbotStatus,
    pub color: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub conversations: usize,
}

/// GET /api/chatbots
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<ChatbotSummary>>, AppError> {
    let chatbots = state.chatbot_service.list(current.id).await?;

    let mut summaries = Vec::with_capacity(chatbots.len());
    for chatbot in chatbots {
        let conversations = state
            .conversations
            .list_by_chatbot(chatbot.id)
            .await
            .map_err(AppError::Repository)?
            .len();
        summaries.push(summarize(chatbot, conversations));
    }

    Ok(Json(summaries))
}

/// POST /api/chatbots
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<NewChatbot>,
) -> Result<(StatusCode, Json<Chatbot>), AppError> {
    let chatbot = state.chatbot_service.create(current.id, payload).await?;
    Ok((StatusCode::CREATED, Json(chatbot)))
}

/// GET /api/chatbots/{id}
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<ChatbotId>,
) -> Result<Json<Chatbot>, AppError> {
    let chatbot = state.chatbot_service.get_owned(id, current.id).await?;
    Ok(Json(chatbot))
}

/// PATCH /api/chatbots/{id}
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<ChatbotId>,
    Json(patch): Json<ChatbotPatch>,
) -> Result<Json<Chatbot>, AppError> {
    let chatbot = state
        .chatbot_service
        .update_owned(id, current.id, patch)
        .await?;
    Ok(Json(chatbot))
}

/// DELETE /api/chatbots/{id}
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<ChatbotId>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.chatbot_service.delete_owned(id, current.id).await?;
    Ok(Json(json!({ "message": "Chatbot deleted successfully" })))
}

fn summarize(chatbot: Chatbot, conversations: usize) -> ChatbotSummary {
    ChatbotSummary {
        id: chatbot.id,
        name: chatbot.name,
        flows: chatbot.flows.len(),
        status: chatbot.status,
        color: chatbot.color,
        created: chatbot.created_at,
        updated: chatbot.updated_at,
        conversations,
    }
}
