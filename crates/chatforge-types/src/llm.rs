//! Completion-provider request/response types.
//!
//! These model the data shapes for one conversation turn against an
//! external text-completion service: the ordered prompt sequence, the
//! sampling parameters, and the provider error taxonomy.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of a message in a prompt or a conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// One entry in the ordered prompt sequence sent to the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// A fully assembled completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    /// System instruction first, prior history in original order, the new
    /// user message last.
    pub messages: Vec<PromptMessage>,
    /// Sampling temperature in [0, 1].
    pub temperature: Option<f64>,
    /// Completion token budget.
    pub max_tokens: u32,
}

/// A model advertised by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub owned_by: String,
}

/// Errors from completion-provider operations.
///
/// The API boundary collapses all of these into an opaque
/// "failed to generate response"; the variants exist so the retry policy
/// can tell transient failures from configuration ones.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Transient provider failure (network, 5xx, rate limit). Retryable.
    #[error("provider error: {message}")]
    Provider { message: String },

    /// The provider answered but the payload had no usable completion.
    #[error("provider returned no completion")]
    EmptyResponse,

    /// Bad or missing credentials. Never retried.
    #[error("provider authentication failed")]
    AuthenticationFailed,
}

impl CompletionError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, CompletionError::Provider { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let parsed: MessageRole = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(CompletionError::Provider {
            message: "502".to_string()
        }
        .is_transient());
        assert!(!CompletionError::AuthenticationFailed.is_transient());
        assert!(!CompletionError::EmptyResponse.is_transient());
    }
}
