//! Application error type mapping domain errors to HTTP responses.
//!
//! Every error serializes as `{"message": "..."}` with the status code
//! the route contract promises: 400 validation/quota, 401
//! unauthenticated, 403 unauthorized, 404 not-found, 502 for
//! completion-provider failures, 500 otherwise.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatforge_types::error::{
    AccountError, BillingError, ChatbotError, ConversationError, RepositoryError,
};
use chatforge_types::llm::CompletionError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Account(AccountError),
    Chatbot(ChatbotError),
    Billing(BillingError),
    Conversation(ConversationError),
    Completion(CompletionError),
    Repository(RepositoryError),
    /// Authentication failure (missing/expired session).
    Unauthorized(String),
    /// Malformed payload caught at the boundary.
    Validation(String),
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        AppError::Account(e)
    }
}

impl From<ChatbotError> for AppError {
    fn from(e: ChatbotError) -> Self {
        AppError::Chatbot(e)
    }
}

impl From<BillingError> for AppError {
    fn from(e: BillingError) -> Self {
        AppError::Billing(e)
    }
}

impl From<ConversationError> for AppError {
    fn from(e: ConversationError) -> Self {
        AppError::Conversation(e)
    }
}

impl From<CompletionError> for AppError {
    fn from(e: CompletionError) -> Self {
        AppError::Completion(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Account(err) => match err {
                AccountError::UsernameTaken(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                AccountError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
                }
                AccountError::NotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
                AccountError::IncorrectPassword => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                AccountError::Hash(_) | AccountError::Storage(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
            },
            AppError::Chatbot(err) => match err {
                ChatbotError::NotFound => {
                    (StatusCode::NOT_FOUND, "Chatbot not found".to_string())
                }
                ChatbotError::Forbidden => (StatusCode::FORBIDDEN, "Not authorized".to_string()),
                ChatbotError::QuotaExceeded { limit } => (
                    StatusCode::BAD_REQUEST,
                    format!(
                        "You have reached the maximum number of chatbots ({limit}) for your \
                         subscription plan. Please upgrade to create more."
                    ),
                ),
                ChatbotError::NoSubscription
                | ChatbotError::PlanNotFound
                | ChatbotError::InvalidName(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                ChatbotError::Storage(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
            },
            AppError::Billing(err) => match err {
                BillingError::PlanNotFound | BillingError::SubscriptionNotFound => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }
                BillingError::Storage(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
            },
            AppError::Conversation(err) => match err {
                ConversationError::ChatbotNotFound => {
                    (StatusCode::NOT_FOUND, "Chatbot not found".to_string())
                }
                ConversationError::ChatbotInactive => {
                    (StatusCode::BAD_REQUEST, "Chatbot is not active".to_string())
                }
                ConversationError::NotFound => {
                    (StatusCode::NOT_FOUND, "Conversation not found".to_string())
                }
                ConversationError::Generation(_) => (
                    StatusCode::BAD_GATEWAY,
                    "Failed to generate response".to_string(),
                ),
                ConversationError::Storage(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
            },
            AppError::Completion(_) => (
                StatusCode::BAD_GATEWAY,
                "Failed to generate response".to_string(),
            ),
            AppError::Repository(err) => match err {
                RepositoryError::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            },
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(%status, error = ?self, "request failed");
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_is_distinct_from_not_found() {
        let (forbidden, _) =
            AppError::Chatbot(ChatbotError::Forbidden).status_and_message();
        let (missing, _) = AppError::Chatbot(ChatbotError::NotFound).status_and_message();
        assert_eq!(forbidden, StatusCode::FORBIDDEN);
        assert_eq!(missing, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_quota_message_carries_limit() {
        let (status, message) =
            AppError::Chatbot(ChatbotError::QuotaExceeded { limit: 3 }).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("(3)"));
    }

    #[test]
    fn test_generation_failure_is_opaque_bad_gateway() {
        let err = AppError::Conversation(ConversationError::Generation(
            CompletionError::Provider {
                message: "secret upstream detail".to_string(),
            },
        ));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!message.contains("secret"));
    }
}
