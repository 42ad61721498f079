//! Conversation service: one request/response cycle of a chatbot
//! conversation, plus the persona-generation utility.

use chatforge_types::chatbot::{Chatbot, ChatbotId, ChatbotStatus};
use chatforge_types::conversation::{
    ChatMessage, Conversation, ConversationId, NewConversation,
};
use chatforge_types::error::ConversationError;
use chrono::Utc;
use tracing::{debug, info};

use crate::chat::turn;
use crate::llm::CompletionService;
use crate::repository::{ChatbotRepository, ConversationRepository};

/// Result of one widget turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub conversation_id: ConversationId,
    pub reply: String,
}

/// Orchestrates the conversation turn flow.
///
/// The append order is load-bearing: the user message is committed
/// BEFORE the completion call, so a failed generation still leaves the
/// unanswered user turn in the log.
pub struct ConversationService<V, C, S>
where
    V: ConversationRepository,
    C: ChatbotRepository,
    S: CompletionService,
{
    conversations: V,
    chatbots: C,
    completion: S,
}

impl<V, C, S> ConversationService<V, C, S>
where
    V: ConversationRepository,
    C: ChatbotRepository,
    S: CompletionService,
{
    pub fn new(conversations: V, chatbots: C, completion: S) -> Self {
        Self {
            conversations,
            chatbots,
            completion,
        }
    }

    /// Execute one turn against an active chatbot.
    ///
    /// With no `conversation_id` a conversation is created lazily; with
    /// one, it must exist and belong to the chatbot. The reply and the
    /// conversation id (for the widget to carry forward) are returned.
    pub async fn respond(
        &self,
        chatbot_id: ChatbotId,
        conversation_id: Option<ConversationId>,
        message: &str,
    ) -> Result<TurnOutcome, ConversationError> {
        let chatbot = self
            .chatbots
            .get(chatbot_id)
            .await
            .map_err(|e| ConversationError::Storage(e.to_string()))?
            .ok_or(ConversationError::ChatbotNotFound)?;

        if chatbot.status != ChatbotStatus::Active {
            return Err(ConversationError::ChatbotInactive);
        }

        let conversation = self.resolve_conversation(&chatbot, conversation_id).await?;

        // History as it stood before this turn.
        let history = conversation.messages.clone();

        self.conversations
            .append_message(conversation.id, ChatMessage::user(message, Utc::now()))
            .await
            .map_err(|e| ConversationError::Storage(e.to_string()))?
            .ok_or(ConversationError::NotFound)?;

        let request = turn::build_request(Some(&chatbot), &history, message);
        debug!(
            chatbot_id = %chatbot.id,
            conversation_id = %conversation.id,
            prompt_len = request.messages.len(),
            "dispatching completion"
        );

        let reply = self
            .completion
            .complete(&request)
            .await
            .map_err(ConversationError::Generation)?;

        self.conversations
            .append_message(conversation.id, ChatMessage::assistant(reply.as_str(), Utc::now()))
            .await
            .map_err(|e| ConversationError::Storage(e.to_string()))?
            .ok_or(ConversationError::NotFound)?;

        Ok(TurnOutcome {
            conversation_id: conversation.id,
            reply,
        })
    }

    /// Generate a chatbot persona description from a short brief.
    ///
    /// Uses the generic system instruction (no chatbot is involved) and
    /// an empty history.
    pub async fn generate_persona(
        &self,
        industry: &str,
        tone: &str,
        purpose: &str,
    ) -> Result<String, ConversationError> {
        let prompt = format!(
            "Create a chatbot persona for a {industry} business with a {tone} tone. \
             The chatbot's purpose is to {purpose}. The response should include:\n\
             1. Greeting message\n\
             2. Persona description (2-3 sentences)\n\
             3. Voice and tone guidelines\n\
             4. Sample responses to common questions"
        );

        let request = turn::build_request(None, &[], &prompt);
        self.completion
            .complete(&request)
            .await
            .map_err(ConversationError::Generation)
    }

    async fn resolve_conversation(
        &self,
        chatbot: &Chatbot,
        conversation_id: Option<ConversationId>,
    ) -> Result<Conversation, ConversationError> {
        match conversation_id {
            Some(id) => {
                let conversation = self
                    .conversations
                    .get(id)
                    .await
                    .map_err(|e| ConversationError::Storage(e.to_string()))?
                    .ok_or(ConversationError::NotFound)?;

                // A conversation belonging to another chatbot is reported
                // as missing, not forbidden: widget callers are anonymous.
                if conversation.chatbot_id != chatbot.id {
                    return Err(ConversationError::NotFound);
                }

                Ok(conversation)
            }
            None => {
                let conversation = self
                    .conversations
                    .create(NewConversation {
                        chatbot_id: chatbot.id,
                        started_at: Utc::now(),
                        messages: vec![],
                        metadata: None,
                    })
                    .await
                    .map_err(|e| ConversationError::Storage(e.to_string()))?;

                info!(
                    chatbot_id = %chatbot.id,
                    conversation_id = %conversation.id,
                    "conversation started"
                );
                Ok(conversation)
            }
        }
    }
}
