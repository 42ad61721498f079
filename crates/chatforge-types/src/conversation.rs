use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::chatbot::ChatbotId;
use crate::llm::MessageRole;

/// Unique identifier for a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationId(pub i64);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// One entry in a conversation's message log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp,
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp,
        }
    }
}

/// The append-only message log for one end-user's interaction session
/// with a chatbot.
///
/// Created lazily on the first end-user message. A conversation is "open"
/// until `ended_at` is set by an external action; nothing in the turn
/// handler ever ends one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub chatbot_id: ChatbotId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub resolved: Option<bool>,
    /// Strictly append-ordered: user then assistant per successful turn.
    pub messages: Vec<ChatMessage>,
    pub metadata: serde_json::Value,
}

impl Conversation {
    /// Whether the conversation is still open.
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

/// Input for creating a conversation. The store assigns the id and
/// defaults the message log to empty and metadata to an empty object.
#[derive(Debug, Clone)]
pub struct NewConversation {
    pub chatbot_id: ChatbotId,
    pub started_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
    pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_until_ended() {
        let mut conv = Conversation {
            id: ConversationId(1),
            chatbot_id: ChatbotId(1),
            started_at: Utc::now(),
            ended_at: None,
            resolved: None,
            messages: vec![],
            metadata: serde_json::json!({}),
        };
        assert!(conv.is_open());
        conv.ended_at = Some(Utc::now());
        assert!(!conv.is_open());
    }

    #[test]
    fn test_message_constructors() {
        let now = Utc::now();
        let msg = ChatMessage::user("Hi", now);
        assert_eq!(msg.role, MessageRole::User);
        let msg = ChatMessage::assistant("Hello!", now);
        assert_eq!(msg.role, MessageRole::Assistant);
    }
}
