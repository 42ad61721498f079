//! Shared domain types for ChatForge.
//!
//! This crate contains the core domain types used across the ChatForge
//! platform: User, Plan, Subscription, Chatbot, Conversation, Template,
//! Settings, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chatbot;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod plan;
pub mod session;
pub mod settings;
pub mod subscription;
pub mod template;
pub mod user;
