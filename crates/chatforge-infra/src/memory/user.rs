//! In-memory user repository.

use dashmap::DashMap;

use chatforge_core::repository::UserRepository;
use chatforge_types::error::RepositoryError;
use chatforge_types::user::{NewUser, User, UserId, UserPatch};

use super::IdSequence;

/// `DashMap`-backed user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: DashMap<UserId, User>,
    ids: IdSequence,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.get(&id).map(|entry| entry.clone()))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.username == username)
            .map(|entry| entry.clone()))
    }

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let id = UserId(self.ids.next());
        let record = User {
            id,
            username: user.username,
            password_hash: user.password_hash,
            email: user.email,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            role: user.role.unwrap_or_else(|| "user".to_string()),
            created_at: user.created_at,
        };
        self.users.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> Result<Option<User>, RepositoryError> {
        let Some(mut entry) = self.users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(email) = patch.email {
            entry.email = email;
        }
        if let Some(full_name) = patch.full_name {
            entry.full_name = Some(full_name);
        }
        if let Some(avatar_url) = patch.avatar_url {
            entry.avatar_url = Some(avatar_url);
        }
        if let Some(password_hash) = patch.password_hash {
            entry.password_hash = password_hash;
        }

        Ok(Some(entry.clone()))
    }
}
