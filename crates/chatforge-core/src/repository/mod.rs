//! Repository trait definitions -- the entity store contract.
//!
//! One trait per entity type, all following the same pattern: direct
//! lookup by id, linear-scan lookup by unique field or foreign key,
//! create with store-assigned sequential ids and stated defaults, typed
//! patch updates, and delete-returning-existence. Implementations live
//! in chatforge-infra (the in-memory store).
//!
//! Uses native async fn in traits (Rust 2024 edition, no async_trait
//! macro). Missing-id lookups resolve to `Ok(None)` / `Ok(false)`,
//! never an error.

pub mod chatbot;
pub mod conversation;
pub mod reference;
pub mod settings;
pub mod subscription;
pub mod user;

pub use chatbot::ChatbotRepository;
pub use conversation::ConversationRepository;
pub use reference::{PlanRepository, TemplateRepository};
pub use settings::SettingsRepository;
pub use subscription::SubscriptionRepository;
pub use user::UserRepository;
