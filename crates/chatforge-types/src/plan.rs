use serde::{Deserialize, Serialize};

/// A subscription tier. Plans are static reference data seeded at startup
/// and immutable thereafter; they are referenced by their string id
/// ("basic", "pro", "enterprise") and never owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    /// Monthly price in whole dollars.
    pub price: i64,
    pub description: String,
    /// Maximum number of chatbots a subscriber may own concurrently.
    pub max_chatbots: usize,
    /// Ordered feature list for the pricing page.
    pub features: Vec<PlanFeature>,
}

/// One row of a plan's feature matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFeature {
    pub name: String,
    pub included: bool,
}

impl PlanFeature {
    pub fn included(name: &str) -> Self {
        Self {
            name: name.to_string(),
            included: true,
        }
    }

    pub fn excluded(name: &str) -> Self {
        Self {
            name: name.to_string(),
            included: false,
        }
    }
}
