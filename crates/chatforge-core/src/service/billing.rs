//! Billing service: plan catalog and subscription upgrades.

use chatforge_types::error::BillingError;
use chatforge_types::plan::Plan;
use chatforge_types::subscription::{Subscription, SubscriptionPatch, SubscriptionStatus};
use chatforge_types::user::UserId;
use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::info;

use crate::repository::{PlanRepository, SubscriptionRepository};

/// Billing window opened on upgrade, matching the registration default.
const BILLING_WINDOW_DAYS: i64 = 30;

/// A plan annotated with whether it is the caller's current one.
#[derive(Debug, Clone, Serialize)]
pub struct PlanListing {
    #[serde(flatten)]
    pub plan: Plan,
    pub is_current: bool,
}

/// The caller's billing picture: their subscription plus the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct BillingOverview {
    pub subscription: Subscription,
    pub current_plan: Plan,
    pub plans: Vec<PlanListing>,
    pub next_billing_date: chrono::DateTime<Utc>,
}

/// Orchestrates plan lookups and subscription changes.
pub struct BillingService<S: SubscriptionRepository, P: PlanRepository> {
    subscriptions: S,
    plans: P,
}

impl<S: SubscriptionRepository, P: PlanRepository> BillingService<S, P> {
    pub fn new(subscriptions: S, plans: P) -> Self {
        Self {
            subscriptions,
            plans,
        }
    }

    /// The full plan catalog, in seed order.
    pub async fn plans(&self) -> Result<Vec<Plan>, BillingError> {
        self.plans
            .list()
            .await
            .map_err(|e| BillingError::Storage(e.to_string()))
    }

    /// Assemble the billing overview for a user.
    pub async fn overview(&self, user_id: UserId) -> Result<BillingOverview, BillingError> {
        let subscription = self
            .subscriptions
            .get_by_user(user_id)
            .await
            .map_err(|e| BillingError::Storage(e.to_string()))?
            .ok_or(BillingError::SubscriptionNotFound)?;

        let plans = self.plans().await?;
        let current_plan = plans
            .iter()
            .find(|p| p.id == subscription.plan_id)
            .cloned()
            .ok_or(BillingError::PlanNotFound)?;

        let listings = plans
            .into_iter()
            .map(|plan| PlanListing {
                is_current: plan.id == subscription.plan_id,
                plan,
            })
            .collect();

        Ok(BillingOverview {
            next_billing_date: subscription.renewal_date,
            subscription,
            current_plan,
            plans: listings,
        })
    }

    /// Move the user's subscription onto `plan_id`, opening a fresh
    /// 30-day billing window. The single subscription record is mutated
    /// in place; no second record is ever created.
    pub async fn upgrade(
        &self,
        user_id: UserId,
        plan_id: &str,
    ) -> Result<Subscription, BillingError> {
        let plan = self
            .plans
            .get(plan_id)
            .await
            .map_err(|e| BillingError::Storage(e.to_string()))?
            .ok_or(BillingError::PlanNotFound)?;

        let subscription = self
            .subscriptions
            .get_by_user(user_id)
            .await
            .map_err(|e| BillingError::Storage(e.to_string()))?
            .ok_or(BillingError::SubscriptionNotFound)?;

        let now = Utc::now();
        let window_end = now + Duration::days(BILLING_WINDOW_DAYS);

        let updated = self
            .subscriptions
            .update(
                subscription.id,
                SubscriptionPatch {
                    plan_id: Some(plan.id.clone()),
                    status: Some(SubscriptionStatus::Active),
                    start_date: Some(now),
                    end_date: Some(window_end),
                    renewal_date: Some(window_end),
                },
            )
            .await
            .map_err(|e| BillingError::Storage(e.to_string()))?
            .ok_or(BillingError::SubscriptionNotFound)?;

        info!(user_id = %user_id, plan = %plan.id, "subscription upgraded");
        Ok(updated)
    }
}
