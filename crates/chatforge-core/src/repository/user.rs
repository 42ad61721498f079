//! User repository trait definition.

use chatforge_types::error::RepositoryError;
use chatforge_types::user::{NewUser, User, UserId, UserPatch};

/// Repository trait for user persistence.
pub trait UserRepository: Send + Sync {
    /// Direct lookup by id.
    fn get(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Linear scan over all users for a unique username.
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Create a user. Assigns the next sequential id and defaults `role`
    /// to "user" when absent.
    fn create(
        &self,
        user: NewUser,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Apply a typed patch. Returns `None` when the id has no record.
    fn update(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}

impl<T: UserRepository> UserRepository for std::sync::Arc<T> {
    async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        (**self).get(id).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        (**self).get_by_username(username).await
    }

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        (**self).create(user).await
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> Result<Option<User>, RepositoryError> {
        (**self).update(id, patch).await
    }
}
