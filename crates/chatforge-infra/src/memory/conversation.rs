//! In-memory conversation repository.

use dashmap::DashMap;

use chatforge_core::repository::ConversationRepository;
use chatforge_types::chatbot::ChatbotId;
use chatforge_types::conversation::{
    ChatMessage, Conversation, ConversationId, NewConversation,
};
use chatforge_types::error::RepositoryError;

use super::IdSequence;

/// `DashMap`-backed conversation store. Append-only: messages are pushed
/// under the entry's lock, so append order is exactly handler order.
#[derive(Debug, Default)]
pub struct InMemoryConversationRepository {
    conversations: DashMap<ConversationId, Conversation>,
    ids: IdSequence,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationRepository for InMemoryConversationRepository {
    async fn get(&self, id: ConversationId) -> Result<Option<Conversation>, RepositoryError> {
        Ok(self.conversations.get(&id).map(|entry| entry.clone()))
    }

    async fn list_by_chatbot(
        &self,
        chatbot_id: ChatbotId,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        let mut owned: Vec<Conversation> = self
            .conversations
            .iter()
            .filter(|entry| entry.chatbot_id == chatbot_id)
            .map(|entry| entry.clone())
            .collect();
        owned.sort_by_key(|c| c.id);
        Ok(owned)
    }

    async fn create(
        &self,
        conversation: NewConversation,
    ) -> Result<Conversation, RepositoryError> {
        let id = ConversationId(self.ids.next());
        let record = Conversation {
            id,
            chatbot_id: conversation.chatbot_id,
            started_at: conversation.started_at,
            ended_at: None,
            resolved: None,
            messages: conversation.messages,
            metadata: conversation
                .metadata
                .unwrap_or_else(|| serde_json::json!({})),
        };
        self.conversations.insert(id, record.clone());
        Ok(record)
    }

    async fn append_message(
        &self,
        id: ConversationId,
        message: ChatMessage,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let Some(mut entry) = self.conversations.get_mut(&id) else {
            return Ok(None);
        };

        entry.messages.push(message);
        Ok(Some(entry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatforge_types::llm::MessageRole;
    use chrono::Utc;

    fn new_conversation(chatbot: i64) -> NewConversation {
        NewConversation {
            chatbot_id: ChatbotId(chatbot),
            started_at: Utc::now(),
            messages: vec![],
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let repo = InMemoryConversationRepository::new();
        let created = repo.create(new_conversation(1)).await.unwrap();

        assert_eq!(created.id, ConversationId(1));
        assert!(created.messages.is_empty());
        assert!(created.ended_at.is_none());
        assert_eq!(created.metadata, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_appends_preserve_order() {
        let repo = InMemoryConversationRepository::new();
        let created = repo.create(new_conversation(1)).await.unwrap();
        let now = Utc::now();

        repo.append_message(created.id, ChatMessage::user("Hi", now))
            .await
            .unwrap();
        let after = repo
            .append_message(created.id, ChatMessage::assistant("Hello!", now))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(after.messages.len(), 2);
        assert_eq!(after.messages[0].role, MessageRole::User);
        assert_eq!(after.messages[0].content, "Hi");
        assert_eq!(after.messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_append_to_missing_conversation_is_none() {
        let repo = InMemoryConversationRepository::new();
        let result = repo
            .append_message(ConversationId(5), ChatMessage::user("Hi", Utc::now()))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_by_chatbot_filters_and_orders() {
        let repo = InMemoryConversationRepository::new();
        repo.create(new_conversation(1)).await.unwrap();
        repo.create(new_conversation(2)).await.unwrap();
        repo.create(new_conversation(1)).await.unwrap();

        let listed = repo.list_by_chatbot(ChatbotId(1)).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].id < listed[1].id);
    }
}
