//! The public widget endpoint: one conversation turn.
//!
//! Unauthenticated by design -- end-users of customer websites hit this
//! route. The chatbot must be active; the conversation id returned on
//! the first turn is carried by the widget for the rest of the session.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use chatforge_types::chatbot::ChatbotId;
use chatforge_types::conversation::ConversationId;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WidgetTurnPayload {
    pub chatbot_id: ChatbotId,
    pub conversation_id: Option<ConversationId>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct WidgetTurnResponse {
    pub response: String,
    pub conversation_id: ConversationId,
}

/// POST /api/chatbot/response
pub async fn respond(
    State(state): State<AppState>,
    Json(payload): Json<WidgetTurnPayload>,
) -> Result<Json<WidgetTurnResponse>, AppError> {
    if payload.message.trim().is_empty() {
        return Err(AppError::Validation("message is required".to_string()));
    }

    let outcome = state
        .conversation_service
        .respond(
            payload.chatbot_id,
            payload.conversation_id,
            &payload.message,
        )
        .await?;

    Ok(Json(WidgetTurnResponse {
        response: outcome.reply,
        conversation_id: outcome.conversation_id,
    }))
}
