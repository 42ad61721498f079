//! Access/authorization gate.
//!
//! Authentication (session resolves to an existing user) happens in the
//! API layer's extractor; this module decides whether an authenticated
//! caller may touch a given entity. Two rules exist: chatbot mutations
//! require ownership, and chatbot creation requires headroom under the
//! owner's plan quota.

use chatforge_types::chatbot::Chatbot;
use chatforge_types::error::ChatbotError;
use chatforge_types::user::UserId;

use crate::repository::{ChatbotRepository, PlanRepository, SubscriptionRepository};

/// Require that `caller` owns `chatbot`.
///
/// A mismatch is an authorization denial, never a not-found -- the two
/// signals are kept distinct so callers cannot conflate them.
pub fn require_owner(chatbot: &Chatbot, caller: UserId) -> Result<(), ChatbotError> {
    if chatbot.user_id == caller {
        Ok(())
    } else {
        Err(ChatbotError::Forbidden)
    }
}

/// Require that `caller` has quota headroom to create one more chatbot.
///
/// Resolves the caller's subscription, its plan, and the current chatbot
/// count; the quota is checked at creation time only, never continuously
/// re-enforced (a plan downgrade does not delete existing chatbots).
pub async fn check_chatbot_quota<S, P, C>(
    subscriptions: &S,
    plans: &P,
    chatbots: &C,
    caller: UserId,
) -> Result<(), ChatbotError>
where
    S: SubscriptionRepository,
    P: PlanRepository,
    C: ChatbotRepository,
{
    let subscription = subscriptions
        .get_by_user(caller)
        .await
        .map_err(|e| ChatbotError::Storage(e.to_string()))?
        .ok_or(ChatbotError::NoSubscription)?;

    let plan = plans
        .get(&subscription.plan_id)
        .await
        .map_err(|e| ChatbotError::Storage(e.to_string()))?
        .ok_or(ChatbotError::PlanNotFound)?;

    let count = chatbots
        .count_by_user(caller)
        .await
        .map_err(|e| ChatbotError::Storage(e.to_string()))?;

    if count >= plan.max_chatbots {
        tracing::info!(
            user_id = %caller,
            plan = %plan.id,
            limit = plan.max_chatbots,
            "chatbot quota exceeded"
        );
        return Err(ChatbotError::QuotaExceeded {
            limit: plan.max_chatbots,
        });
    }

    Ok(())
}
