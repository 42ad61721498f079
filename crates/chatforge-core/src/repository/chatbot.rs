//! Chatbot repository trait definition.

use chatforge_types::chatbot::{Chatbot, ChatbotId, ChatbotPatch, NewChatbot};
use chatforge_types::error::RepositoryError;
use chatforge_types::user::UserId;

/// Repository trait for chatbot persistence.
pub trait ChatbotRepository: Send + Sync {
    fn get(
        &self,
        id: ChatbotId,
    ) -> impl std::future::Future<Output = Result<Option<Chatbot>, RepositoryError>> + Send;

    /// All chatbots owned by a user, in insertion order.
    fn list_by_user(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Chatbot>, RepositoryError>> + Send;

    /// Convenience count for quota checks; equals `list_by_user(..).len()`.
    fn count_by_user(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<usize, RepositoryError>> + Send;

    /// Create a chatbot, filling stated defaults: status draft, color
    /// "primary", empty flows, default appearance and AI settings.
    fn create(
        &self,
        chatbot: NewChatbot,
    ) -> impl std::future::Future<Output = Result<Chatbot, RepositoryError>> + Send;

    /// Apply a typed patch. Nested objects are replaced wholesale.
    /// Returns `None` when the id has no record.
    fn update(
        &self,
        id: ChatbotId,
        patch: ChatbotPatch,
    ) -> impl std::future::Future<Output = Result<Option<Chatbot>, RepositoryError>> + Send;

    /// Remove a chatbot. Returns whether it existed; never errors on a
    /// missing id.
    fn delete(
        &self,
        id: ChatbotId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}

impl<T: ChatbotRepository> ChatbotRepository for std::sync::Arc<T> {
    async fn get(&self, id: ChatbotId) -> Result<Option<Chatbot>, RepositoryError> {
        (**self).get(id).await
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Chatbot>, RepositoryError> {
        (**self).list_by_user(user_id).await
    }

    async fn count_by_user(&self, user_id: UserId) -> Result<usize, RepositoryError> {
        (**self).count_by_user(user_id).await
    }

    async fn create(&self, chatbot: NewChatbot) -> Result<Chatbot, RepositoryError> {
        (**self).create(chatbot).await
    }

    async fn update(
        &self,
        id: ChatbotId,
        patch: ChatbotPatch,
    ) -> Result<Option<Chatbot>, RepositoryError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: ChatbotId) -> Result<bool, RepositoryError> {
        (**self).delete(id).await
    }
}
