//! In-memory reference-data catalogs: plans and templates.
//!
//! Seeded once at startup (see [`crate::seed`]) and read-only after.
//! Seed order is preserved for listings.

use chatforge_core::repository::{PlanRepository, TemplateRepository};
use chatforge_types::error::RepositoryError;
use chatforge_types::plan::Plan;
use chatforge_types::template::{Template, TemplateId};

/// Immutable plan catalog.
#[derive(Debug)]
pub struct InMemoryPlanRepository {
    plans: Vec<Plan>,
}

impl InMemoryPlanRepository {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self { plans }
    }
}

impl PlanRepository for InMemoryPlanRepository {
    async fn list(&self) -> Result<Vec<Plan>, RepositoryError> {
        Ok(self.plans.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Plan>, RepositoryError> {
        Ok(self.plans.iter().find(|p| p.id == id).cloned())
    }
}

/// Immutable template catalog.
#[derive(Debug)]
pub struct InMemoryTemplateRepository {
    templates: Vec<Template>,
}

impl InMemoryTemplateRepository {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }
}

impl TemplateRepository for InMemoryTemplateRepository {
    async fn list(&self) -> Result<Vec<Template>, RepositoryError> {
        Ok(self.templates.clone())
    }

    async fn get(&self, id: TemplateId) -> Result<Option<Template>, RepositoryError> {
        Ok(self.templates.iter().find(|t| t.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[tokio::test]
    async fn test_seeded_plans_resolve_by_id() {
        let repo = InMemoryPlanRepository::new(seed::default_plans());

        let basic = repo.get("basic").await.unwrap().unwrap();
        assert_eq!(basic.max_chatbots, 3);
        assert!(repo.get("platinum").await.unwrap().is_none());

        let ids: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, ["basic", "pro", "enterprise"]);
    }

    #[tokio::test]
    async fn test_seeded_templates_resolve_by_id() {
        let repo = InMemoryTemplateRepository::new(seed::default_templates());

        let first = repo.get(TemplateId(1)).await.unwrap().unwrap();
        assert_eq!(first.name, "Customer Support");
        assert!(repo.get(TemplateId(99)).await.unwrap().is_none());
        assert_eq!(repo.list().await.unwrap().len(), 4);
    }
}
