use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Unique identifier for a chatbot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChatbotId(pub i64);

impl fmt::Display for ChatbotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatbotId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Chatbot lifecycle states.
///
/// - Draft: being built, not reachable from the widget
/// - Active: deployed, the public widget endpoint will answer
/// - Inactive: paused by the owner, configuration preserved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatbotStatus {
    Draft,
    Active,
    Inactive,
}

impl fmt::Display for ChatbotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatbotStatus::Draft => write!(f, "draft"),
            ChatbotStatus::Active => write!(f, "active"),
            ChatbotStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl FromStr for ChatbotStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(ChatbotStatus::Draft),
            "active" => Ok(ChatbotStatus::Active),
            "inactive" => Ok(ChatbotStatus::Inactive),
            other => Err(format!("invalid chatbot status: '{other}'")),
        }
    }
}

impl Default for ChatbotStatus {
    fn default() -> Self {
        ChatbotStatus::Draft
    }
}

/// Widget appearance settings.
///
/// Updated atomically: a patch carrying an `Appearance` replaces the whole
/// object, it never merges individual fields. Fields missing from an
/// incoming payload are filled from the defaults, not from stored state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub primary_color: String,
    pub font_family: String,
    pub border_radius: u32,
    /// Corner of the host page the widget anchors to, e.g. "bottom-right".
    pub position: String,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            primary_color: "#3B82F6".to_string(),
            font_family: "Inter".to_string(),
            border_radius: 8,
            position: "bottom-right".to_string(),
        }
    }
}

/// Language-model settings for a chatbot. Replaced atomically on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub model: String,
    /// Persona text appended to the system instruction.
    pub persona: String,
    /// Sampling temperature in [0, 1].
    pub temperature: f64,
    /// Completion token budget per turn.
    pub max_response_length: u32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            persona: String::new(),
            temperature: 0.7,
            max_response_length: 512,
        }
    }
}

/// Categories of conversational flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Greeting,
    Faq,
    Support,
    Custom,
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowKind::Greeting => write!(f, "greeting"),
            FlowKind::Faq => write!(f, "faq"),
            FlowKind::Support => write!(f, "support"),
            FlowKind::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for FlowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greeting" => Ok(FlowKind::Greeting),
            "faq" => Ok(FlowKind::Faq),
            "support" => Ok(FlowKind::Support),
            "custom" => Ok(FlowKind::Custom),
            other => Err(format!("invalid flow kind: '{other}'")),
        }
    }
}

/// A named sub-unit of chatbot conversational logic.
///
/// Owned exclusively by one chatbot and stored inline with it. The node
/// list is opaque to the backend; only the builder UI interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FlowKind,
    #[serde(default)]
    pub nodes: Vec<serde_json::Value>,
}

/// A user-owned configuration bundle defining one embeddable AI assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chatbot {
    pub id: ChatbotId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub status: ChatbotStatus,
    /// Theme color token for listings ("primary" unless set).
    pub color: String,
    pub appearance: Appearance,
    /// Opaque widget behavior settings, interpreted only by the builder UI.
    pub settings: serde_json::Value,
    pub ai_settings: AiSettings,
    pub flows: Vec<Flow>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a chatbot. Only `name` is required -- the store
/// fills the stated defaults (status draft, color "primary", empty flows).
#[derive(Debug, Clone, Deserialize)]
pub struct NewChatbot {
    #[serde(skip_deserializing, default = "default_user_id")]
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<ChatbotStatus>,
    pub color: Option<String>,
    pub appearance: Option<Appearance>,
    pub settings: Option<serde_json::Value>,
    pub ai_settings: Option<AiSettings>,
    pub flows: Option<Vec<Flow>>,
}

fn default_user_id() -> UserId {
    UserId(0)
}

/// Typed patch for chatbot updates.
///
/// Scalar fields are independently updatable; the nested objects
/// (`appearance`, `settings`, `ai_settings`) and the flow list are
/// replace-only. A patch cannot clear `description` back to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatbotPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ChatbotStatus>,
    pub color: Option<String>,
    pub appearance: Option<Appearance>,
    pub settings: Option<serde_json::Value>,
    pub ai_settings: Option<AiSettings>,
    pub flows: Option<Vec<Flow>>,
}

impl ChatbotPatch {
    /// True when no field is set; such a patch only bumps `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.color.is_none()
            && self.appearance.is_none()
            && self.settings.is_none()
            && self.ai_settings.is_none()
            && self.flows.is_none()
    }
}
