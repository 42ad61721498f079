//! Account service: registration, login, profile, password changes.
//!
//! Registration is the one multi-entity write in the system: it creates
//! the user and their default "basic" subscription with a 30-day billing
//! window. There is no rollback -- a subscription-create failure after
//! the user row exists surfaces as an error with the user row committed,
//! matching the store's no-partial-failure model.

use chatforge_types::error::AccountError;
use chatforge_types::subscription::{NewSubscription, Subscription, SubscriptionStatus};
use chatforge_types::user::{NewUser, User, UserId, UserPatch};
use chrono::{Duration, Utc};
use tracing::info;

use crate::repository::{SubscriptionRepository, UserRepository};
use crate::service::hash::PasswordHasher;

/// Plan every new account starts on.
const DEFAULT_PLAN_ID: &str = "basic";

/// Length of the billing window opened at registration and on upgrade.
const BILLING_WINDOW_DAYS: i64 = 30;

/// Payload for registration.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Orchestrates account lifecycle against the user and subscription
/// repositories.
pub struct AccountService<U: UserRepository, S: SubscriptionRepository, H: PasswordHasher> {
    users: U,
    subscriptions: S,
    hasher: H,
}

impl<U: UserRepository, S: SubscriptionRepository, H: PasswordHasher> AccountService<U, S, H> {
    pub fn new(users: U, subscriptions: S, hasher: H) -> Self {
        Self {
            users,
            subscriptions,
            hasher,
        }
    }

    /// Register a new account.
    ///
    /// Rejects a taken username, hashes the password, creates the user,
    /// then opens the default subscription: plan "basic", active, with
    /// `renewal_date` exactly 30 days after `start_date`.
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<(User, Subscription), AccountError> {
        let existing = self
            .users
            .get_by_username(&request.username)
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?;
        if existing.is_some() {
            return Err(AccountError::UsernameTaken(request.username));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let now = Utc::now();

        let user = self
            .users
            .create(NewUser {
                username: request.username,
                password_hash,
                email: request.email,
                full_name: None,
                avatar_url: None,
                role: None,
                created_at: now,
            })
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?;

        let window_end = now + Duration::days(BILLING_WINDOW_DAYS);
        let subscription = self
            .subscriptions
            .create(NewSubscription {
                user_id: user.id,
                plan_id: DEFAULT_PLAN_ID.to_string(),
                status: SubscriptionStatus::Active,
                start_date: now,
                end_date: window_end,
                renewal_date: window_end,
            })
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?;

        info!(user_id = %user.id, username = %user.username, "account registered");
        Ok((user, subscription))
    }

    /// Verify credentials and return the user.
    ///
    /// A missing user and a wrong password both collapse into
    /// [`AccountError::InvalidCredentials`] so login probes cannot tell
    /// the two apart.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AccountError> {
        let user = self
            .users
            .get_by_username(username)
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Fetch a user by id.
    pub async fn get(&self, id: UserId) -> Result<User, AccountError> {
        self.users
            .get(id)
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?
            .ok_or(AccountError::NotFound)
    }

    /// Update profile fields (never the credential through this path).
    pub async fn update_profile(
        &self,
        id: UserId,
        mut patch: UserPatch,
    ) -> Result<User, AccountError> {
        patch.password_hash = None;
        self.users
            .update(id, patch)
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?
            .ok_or(AccountError::NotFound)
    }

    /// Change the password after verifying the current one.
    pub async fn change_password(
        &self,
        id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let user = self.get(id).await?;

        if !self.hasher.verify(current_password, &user.password_hash) {
            return Err(AccountError::IncorrectPassword);
        }

        let password_hash = self.hasher.hash(new_password)?;
        self.users
            .update(
                id,
                UserPatch {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?
            .ok_or(AccountError::NotFound)?;

        info!(user_id = %id, "password changed");
        Ok(())
    }
}
