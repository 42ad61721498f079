//! Chatbot management service.
//!
//! Every mutation passes the access gate: creation is quota-checked
//! against the owner's plan, and get/update/delete of a specific chatbot
//! require ownership.

use chatforge_types::chatbot::{Chatbot, ChatbotId, ChatbotPatch, NewChatbot};
use chatforge_types::error::ChatbotError;
use chatforge_types::user::UserId;
use tracing::info;

use crate::access;
use crate::repository::{ChatbotRepository, PlanRepository, SubscriptionRepository};

/// Orchestrates the chatbot lifecycle behind the access gate.
pub struct ChatbotService<C: ChatbotRepository, S: SubscriptionRepository, P: PlanRepository> {
    chatbots: C,
    subscriptions: S,
    plans: P,
}

impl<C: ChatbotRepository, S: SubscriptionRepository, P: PlanRepository>
    ChatbotService<C, S, P>
{
    pub fn new(chatbots: C, subscriptions: S, plans: P) -> Self {
        Self {
            chatbots,
            subscriptions,
            plans,
        }
    }

    /// Create a chatbot for `owner`, enforcing the plan quota.
    pub async fn create(
        &self,
        owner: UserId,
        mut input: NewChatbot,
    ) -> Result<Chatbot, ChatbotError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(ChatbotError::InvalidName("name cannot be empty".to_string()));
        }
        input.name = name;
        input.user_id = owner;

        access::check_chatbot_quota(&self.subscriptions, &self.plans, &self.chatbots, owner)
            .await?;

        let chatbot = self
            .chatbots
            .create(input)
            .await
            .map_err(|e| ChatbotError::Storage(e.to_string()))?;

        info!(chatbot_id = %chatbot.id, user_id = %owner, "chatbot created");
        Ok(chatbot)
    }

    /// All chatbots owned by `owner`, in creation order.
    pub async fn list(&self, owner: UserId) -> Result<Vec<Chatbot>, ChatbotError> {
        self.chatbots
            .list_by_user(owner)
            .await
            .map_err(|e| ChatbotError::Storage(e.to_string()))
    }

    /// Fetch a chatbot the caller owns.
    ///
    /// Not-found and forbidden stay distinct: a missing id is `NotFound`,
    /// an existing chatbot owned by someone else is `Forbidden`.
    pub async fn get_owned(
        &self,
        id: ChatbotId,
        caller: UserId,
    ) -> Result<Chatbot, ChatbotError> {
        let chatbot = self
            .chatbots
            .get(id)
            .await
            .map_err(|e| ChatbotError::Storage(e.to_string()))?
            .ok_or(ChatbotError::NotFound)?;

        access::require_owner(&chatbot, caller)?;
        Ok(chatbot)
    }

    /// Patch a chatbot the caller owns. The store stamps `updated_at`.
    pub async fn update_owned(
        &self,
        id: ChatbotId,
        caller: UserId,
        patch: ChatbotPatch,
    ) -> Result<Chatbot, ChatbotError> {
        self.get_owned(id, caller).await?;

        let updated = self
            .chatbots
            .update(id, patch)
            .await
            .map_err(|e| ChatbotError::Storage(e.to_string()))?
            .ok_or(ChatbotError::NotFound)?;

        Ok(updated)
    }

    /// Delete a chatbot the caller owns.
    pub async fn delete_owned(&self, id: ChatbotId, caller: UserId) -> Result<(), ChatbotError> {
        self.get_owned(id, caller).await?;

        self.chatbots
            .delete(id)
            .await
            .map_err(|e| ChatbotError::Storage(e.to_string()))?;

        info!(chatbot_id = %id, user_id = %caller, "chatbot deleted");
        Ok(())
    }
}
