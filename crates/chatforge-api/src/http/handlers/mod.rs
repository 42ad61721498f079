//! Route handlers.

pub mod ai;
pub mod analytics;
pub mod auth;
pub mod billing;
pub mod chatbot;
pub mod dashboard;
pub mod profile;
pub mod settings;
pub mod template;
pub mod widget;
