//! Conversation repository trait definition.

use chatforge_types::chatbot::ChatbotId;
use chatforge_types::conversation::{ChatMessage, Conversation, ConversationId, NewConversation};
use chatforge_types::error::RepositoryError;

/// Repository trait for conversation persistence.
///
/// Conversations are append-only: there is no update or delete, only
/// message appends. `append_message` preserves strict append order.
pub trait ConversationRepository: Send + Sync {
    fn get(
        &self,
        id: ConversationId,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// All conversations for a chatbot, in insertion order.
    fn list_by_chatbot(
        &self,
        chatbot_id: ChatbotId,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;

    fn create(
        &self,
        conversation: NewConversation,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Append one message to the conversation's log. Returns the updated
    /// conversation, or `None` when the id has no record.
    fn append_message(
        &self,
        id: ConversationId,
        message: ChatMessage,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;
}

impl<T: ConversationRepository> ConversationRepository for std::sync::Arc<T> {
    async fn get(&self, id: ConversationId) -> Result<Option<Conversation>, RepositoryError> {
        (**self).get(id).await
    }

    async fn list_by_chatbot(
        &self,
        chatbot_id: ChatbotId,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        (**self).list_by_chatbot(chatbot_id).await
    }

    async fn create(
        &self,
        conversation: NewConversation,
    ) -> Result<Conversation, RepositoryError> {
        (**self).create(conversation).await
    }

    async fn append_message(
        &self,
        id: ConversationId,
        message: ChatMessage,
    ) -> Result<Option<Conversation>, RepositoryError> {
        (**self).append_message(id, message).await
    }
}
