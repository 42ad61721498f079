//! In-memory entity store.
//!
//! One repository per entity type, each a `DashMap` keyed by id with a
//! monotonic id sequence. State lives for the process lifetime only and
//! is lost on restart -- the deliberate simplification the platform
//! ships with. Two concurrent writers to the same record race with
//! last-write-wins; the repository traits isolate that gap so a
//! transactional backend can replace these without touching callers.
//!
//! `DashMap` iteration order is arbitrary, but ids are assigned in
//! insertion order, so foreign-key listings sort by id to restore it.

pub mod chatbot;
pub mod conversation;
pub mod reference;
pub mod settings;
pub mod subscription;
pub mod user;

pub use chatbot::InMemoryChatbotRepository;
pub use conversation::InMemoryConversationRepository;
pub use reference::{InMemoryPlanRepository, InMemoryTemplateRepository};
pub use settings::InMemorySettingsRepository;
pub use subscription::InMemorySubscriptionRepository;
pub use user::InMemoryUserRepository;

use std::sync::atomic::{AtomicI64, Ordering};

/// Monotonic id sequence starting at 1. Ids are never reused, even
/// after deletion.
#[derive(Debug)]
pub(crate) struct IdSequence {
    next: AtomicI64,
}

impl IdSequence {
    pub(crate) fn new() -> Self {
        Self {
            next: AtomicI64::new(1),
        }
    }

    pub(crate) fn next(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
