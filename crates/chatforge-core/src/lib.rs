//! Business logic and repository trait definitions for ChatForge.
//!
//! This crate defines the "ports" (repository traits, the completion
//! service trait) that the infrastructure layer implements, plus the
//! services that orchestrate them. It depends only on `chatforge-types`
//! -- never on `chatforge-infra` or any HTTP/provider crate.

pub mod access;
pub mod chat;
pub mod llm;
pub mod repository;
pub mod service;
