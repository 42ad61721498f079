//! Reference-data repository traits: plans and templates.
//!
//! Both are seeded at startup and read-only thereafter, so the traits
//! expose lookups only.

use chatforge_types::error::RepositoryError;
use chatforge_types::plan::Plan;
use chatforge_types::template::{Template, TemplateId};

/// Read-only catalog of subscription plans.
pub trait PlanRepository: Send + Sync {
    /// All plans, in seed order.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Plan>, RepositoryError>> + Send;

    fn get(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Plan>, RepositoryError>> + Send;
}

/// Read-only catalog of chatbot templates.
pub trait TemplateRepository: Send + Sync {
    /// All templates, in seed order.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Template>, RepositoryError>> + Send;

    fn get(
        &self,
        id: TemplateId,
    ) -> impl std::future::Future<Output = Result<Option<Template>, RepositoryError>> + Send;
}

impl<T: PlanRepository> PlanRepository for std::sync::Arc<T> {
    async fn list(&self) -> Result<Vec<Plan>, RepositoryError> {
        (**self).list().await
    }

    async fn get(&self, id: &str) -> Result<Option<Plan>, RepositoryError> {
        (**self).get(id).await
    }
}

impl<T: TemplateRepository> TemplateRepository for std::sync::Arc<T> {
    async fn list(&self) -> Result<Vec<Template>, RepositoryError> {
        (**self).list().await
    }

    async fn get(&self, id: TemplateId) -> Result<Option<Template>, RepositoryError> {
        (**self).get(id).await
    }
}
