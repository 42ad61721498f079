//! In-memory session store.
//!
//! Opaque bearer token -> user id. Tokens are UUID v7, issued at
//! register/login and revoked at logout. Like the entity store, sessions
//! live for the process lifetime only.

use dashmap::DashMap;
use tracing::debug;

use chatforge_types::session::SessionToken;
use chatforge_types::user::UserId;

/// `DashMap`-backed token-to-user mapping.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionToken, UserId>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for a user.
    pub fn issue(&self, user_id: UserId) -> SessionToken {
        let token = SessionToken::new();
        self.sessions.insert(token, user_id);
        debug!(user_id = %user_id, "session issued");
        token
    }

    /// Resolve a presented token to its user, if the session is live.
    pub fn resolve(&self, token: SessionToken) -> Option<UserId> {
        self.sessions.get(&token).map(|entry| *entry)
    }

    /// Revoke a token. Returns whether it was live.
    pub fn revoke(&self, token: SessionToken) -> bool {
        self.sessions.remove(&token).is_some()
    }
}
