//! Subscription repository trait definition.

use chatforge_types::error::RepositoryError;
use chatforge_types::subscription::{
    NewSubscription, Subscription, SubscriptionId, SubscriptionPatch,
};
use chatforge_types::user::UserId;

/// Repository trait for subscription persistence.
///
/// Exactly one subscription exists per user: `create` must reject a
/// second record for the same user with [`RepositoryError::Conflict`].
/// Plan upgrades go through `update` on the existing record.
pub trait SubscriptionRepository: Send + Sync {
    fn get(
        &self,
        id: SubscriptionId,
    ) -> impl std::future::Future<Output = Result<Option<Subscription>, RepositoryError>> + Send;

    /// The user's single subscription, if one exists.
    fn get_by_user(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<Subscription>, RepositoryError>> + Send;

    /// Create the user's subscription. Conflicts when one already exists.
    fn create(
        &self,
        subscription: NewSubscription,
    ) -> impl std::future::Future<Output = Result<Subscription, RepositoryError>> + Send;

    fn update(
        &self,
        id: SubscriptionId,
        patch: SubscriptionPatch,
    ) -> impl std::future::Future<Output = Result<Option<Subscription>, RepositoryError>> + Send;
}

impl<T: SubscriptionRepository> SubscriptionRepository for std::sync::Arc<T> {
    async fn get(&self, id: SubscriptionId) -> Result<Option<Subscription>, RepositoryError> {
        (**self).get(id).await
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Subscription>, RepositoryError> {
        (**self).get_by_user(user_id).await
    }

    async fn create(
        &self,
        subscription: NewSubscription,
    ) -> Result<Subscription, RepositoryError> {
        (**self).create(subscription).await
    }

    async fn update(
        &self,
        id: SubscriptionId,
        patch: SubscriptionPatch,
    ) -> Result<Option<Subscription>, RepositoryError> {
        (**self).update(id, patch).await
    }
}
