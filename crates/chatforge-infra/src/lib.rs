//! Infrastructure layer for ChatForge.
//!
//! Contains implementations of the ports defined in `chatforge-core`:
//! the in-memory entity store (process-lifetime, lost on restart by
//! design), argon2 password hashing, the OpenAI-compatible completion
//! client, the session store, seed data, and configuration loading.

pub mod config;
pub mod crypto;
pub mod llm;
pub mod memory;
pub mod seed;
pub mod session;

#[cfg(test)]
mod service_tests;
