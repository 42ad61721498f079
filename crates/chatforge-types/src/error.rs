use thiserror::Error;

/// Errors from repository operations (used by trait definitions in
/// chatforge-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors related to account operations (registration, login, profile).
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username '{0}' already exists")]
    UsernameTaken(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user not found")]
    NotFound,

    #[error("current password is incorrect")]
    IncorrectPassword,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors related to chatbot operations.
#[derive(Debug, Error)]
pub enum ChatbotError {
    #[error("chatbot not found")]
    NotFound,

    /// The caller does not own the chatbot. Deliberately distinct from
    /// `NotFound` so the two are never conflated.
    #[error("not authorized")]
    Forbidden,

    /// The owner's plan does not allow another chatbot. Carries the
    /// numeric limit for display.
    #[error("chatbot limit of {limit} reached for the current plan")]
    QuotaExceeded { limit: usize },

    #[error("no active subscription found")]
    NoSubscription,

    #[error("subscription plan not found")]
    PlanNotFound,

    #[error("invalid chatbot name: {0}")]
    InvalidName(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors related to billing operations.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("plan not found")]
    PlanNotFound,

    #[error("no subscription found")]
    SubscriptionNotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from the conversation turn flow.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("chatbot not found")]
    ChatbotNotFound,

    #[error("chatbot is not active")]
    ChatbotInactive,

    #[error("conversation not found")]
    NotFound,

    #[error("failed to generate response")]
    Generation(#[source] crate::llm::CompletionError),

    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_error_carries_limit() {
        let err = ChatbotError::QuotaExceeded { limit: 3 };
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_account_error_display() {
        let err = AccountError::UsernameTaken("mira".to_string());
        assert_eq!(err.to_string(), "username 'mira' already exists");
    }

    #[test]
    fn test_generation_error_is_opaque() {
        let err = ConversationError::Generation(crate::llm::CompletionError::Provider {
            message: "upstream 503".to_string(),
        });
        assert_eq!(err.to_string(), "failed to generate response");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Conflict("subscription exists".to_string());
        assert_eq!(err.to_string(), "conflict: subscription exists");
    }
}
