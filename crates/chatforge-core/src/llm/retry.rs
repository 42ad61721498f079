//! Retry-with-backoff decorator for completion services.
//!
//! Wraps any [`CompletionService`] and retries transient failures with
//! exponential backoff. The policy lives entirely here, decoupled from
//! turn logic, so it can be tuned or removed without touching the
//! conversation handler.

use std::time::Duration;

use chatforge_types::llm::{CompletionError, CompletionRequest, ModelInfo};
use tracing::warn;

use super::provider::CompletionService;

/// Bounded-attempts exponential backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Must be at least 1.
    pub max_attempts: u32,
    /// Sleep before the first retry; doubles per retry.
    pub initial_backoff: Duration,
    /// Ceiling for a single backoff sleep.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(4),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    fn backoff_for(&self, retry_index: u32) -> Duration {
        let factor = 1u32 << retry_index.min(16);
        (self.initial_backoff * factor).min(self.max_backoff)
    }
}

/// A [`CompletionService`] wrapper retrying transient errors.
///
/// Non-transient errors (authentication, empty payloads) return
/// immediately; only provider-side failures consume the attempt budget.
pub struct Retrying<S: CompletionService> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: CompletionService> Retrying<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn run<T, F, Fut>(&self, label: &str, op: F) -> Result<T, CompletionError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, CompletionError>>,
    {
        let attempts = self.policy.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let backoff = self.policy.backoff_for(attempt - 1);
                tokio::time::sleep(backoff).await;
            }

            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt + 1 < attempts => {
                    warn!(
                        operation = label,
                        attempt = attempt + 1,
                        error = %err,
                        "transient completion failure, retrying"
                    );
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        // Unreachable while attempts >= 1; kept for totality.
        Err(last_error.unwrap_or(CompletionError::EmptyResponse))
    }
}

impl<S: CompletionService> CompletionService for Retrying<S> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.run("complete", || self.inner.complete(request)).await
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, CompletionError> {
        self.run("embed", || self.inner.embed(text)).await
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, CompletionError> {
        self.run("list_models", || self.inner.list_models()).await
    }
}
