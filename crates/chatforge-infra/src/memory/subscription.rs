//! In-memory subscription repository.
//!
//! Enforces the single-subscription-per-user invariant: a second create
//! for the same user is a conflict, never a silent duplicate.

use dashmap::DashMap;

use chatforge_core::repository::SubscriptionRepository;
use chatforge_types::error::RepositoryError;
use chatforge_types::subscription::{
    NewSubscription, Subscription, SubscriptionId, SubscriptionPatch,
};
use chatforge_types::user::UserId;

use super::IdSequence;

/// `DashMap`-backed subscription store.
#[derive(Debug, Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: DashMap<SubscriptionId, Subscription>,
    ids: IdSequence,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn get(&self, id: SubscriptionId) -> Result<Option<Subscription>, RepositoryError> {
        Ok(self.subscriptions.get(&id).map(|entry| entry.clone()))
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Subscription>, RepositoryError> {
        Ok(self
            .subscriptions
            .iter()
            .find(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone()))
    }

    async fn create(
        &self,
        subscription: NewSubscription,
    ) -> Result<Subscription, RepositoryError> {
        if self.get_by_user(subscription.user_id).await?.is_some() {
            return Err(RepositoryError::Conflict(format!(
                "user {} already has a subscription",
                subscription.user_id
            )));
        }

        let id = SubscriptionId(self.ids.next());
        let record = Subscription {
            id,
            user_id: subscription.user_id,
            plan_id: subscription.plan_id,
            status: subscription.status,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            renewal_date: subscription.renewal_date,
        };
        self.subscriptions.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: SubscriptionId,
        patch: SubscriptionPatch,
    ) -> Result<Option<Subscription>, RepositoryError> {
        let Some(mut entry) = self.subscriptions.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(plan_id) = patch.plan_id {
            entry.plan_id = plan_id;
        }
        if let Some(status) = patch.status {
            entry.status = status;
        }
        if let Some(start_date) = patch.start_date {
            entry.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            entry.end_date = end_date;
        }
        if let Some(renewal_date) = patch.renewal_date {
            entry.renewal_date = renewal_date;
        }

        Ok(Some(entry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatforge_types::subscription::SubscriptionStatus;
    use chrono::{Duration, Utc};

    fn basic_subscription(user: i64) -> NewSubscription {
        let now = Utc::now();
        NewSubscription {
            user_id: UserId(user),
            plan_id: "basic".to_string(),
            status: SubscriptionStatus::Active,
            start_date: now,
            end_date: now + Duration::days(30),
            renewal_date: now + Duration::days(30),
        }
    }

    #[tokio::test]
    async fn test_one_subscription_per_user() {
        let repo = InMemorySubscriptionRepository::new();
        repo.create(basic_subscription(1)).await.unwrap();

        let second = repo.create(basic_subscription(1)).await;
        assert!(matches!(second, Err(RepositoryError::Conflict(_))));

        // A different user is unaffected.
        repo.create(basic_subscription(2)).await.unwrap();
    }

    #[tokio::test]
    async fn test_upgrade_patch_replaces_plan_and_window() {
        let repo = InMemorySubscriptionRepository::new();
        let created = repo.create(basic_subscription(1)).await.unwrap();

        let now = Utc::now();
        let updated = repo
            .update(
                created.id,
                SubscriptionPatch {
                    plan_id: Some("pro".to_string()),
                    renewal_date: Some(now + Duration::days(30)),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.plan_id, "pro");
        assert_eq!(updated.status, SubscriptionStatus::Active);
        // Unpatched fields are untouched.
        assert_eq!(updated.start_date, created.start_date);
    }

    #[tokio::test]
    async fn test_get_by_user() {
        let repo = InMemorySubscriptionRepository::new();
        repo.create(basic_subscription(1)).await.unwrap();

        assert!(repo.get_by_user(UserId(1)).await.unwrap().is_some());
        assert!(repo.get_by_user(UserId(2)).await.unwrap().is_none());
    }
}
