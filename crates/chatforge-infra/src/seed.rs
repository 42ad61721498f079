//! Static reference data seeded at startup.

use chatforge_types::plan::{Plan, PlanFeature};
use chatforge_types::template::{Complexity, Template, TemplateId};

/// The three subscription tiers.
pub fn default_plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "basic".to_string(),
            name: "Basic".to_string(),
            price: 29,
            description: "Great for individuals and small websites".to_string(),
            max_chatbots: 3,
            features: vec![
                PlanFeature::included("Up to 3 chatbots"),
                PlanFeature::included("Standard AI models"),
                PlanFeature::included("Email support"),
                PlanFeature::included("Analytics dashboard"),
                PlanFeature::excluded("Custom branding"),
                PlanFeature::excluded("API access"),
            ],
        },
        Plan {
            id: "pro".to_string(),
            name: "Professional".to_string(),
            price: 79,
            description: "Perfect for growing businesses".to_string(),
            max_chatbots: 10,
            features: vec![
                PlanFeature::included("Up to 10 chatbots"),
                PlanFeature::included("Advanced AI models"),
                PlanFeature::included("Priority support"),
                PlanFeature::included("Analytics dashboard"),
                PlanFeature::included("Custom branding"),
                PlanFeature::included("API access"),
            ],
        },
        Plan {
            id: "enterprise".to_string(),
            name: "Enterprise".to_string(),
            price: 199,
            description: "For large organizations with complex needs".to_string(),
            max_chatbots: 50,
            features: vec![
                PlanFeature::included("Up to 50 chatbots"),
                PlanFeature::included("Premium AI models"),
                PlanFeature::included("24/7 dedicated support"),
                PlanFeature::included("Advanced analytics"),
                PlanFeature::included("Custom branding"),
                PlanFeature::included("Full API access"),
            ],
        },
    ]
}

/// The built-in chatbot starting points.
pub fn default_templates() -> Vec<Template> {
    vec![
        Template {
            id: TemplateId(1),
            name: "Customer Support".to_string(),
            description: "Handle common customer inquiries and support requests".to_string(),
            icon: "help".to_string(),
            color: "blue".to_string(),
            category: "Support".to_string(),
            complexity: Complexity::Moderate,
            content: serde_json::json!({ "flows": [], "settings": {} }),
        },
        Template {
            id: TemplateId(2),
            name: "E-commerce Assistant".to_string(),
            description: "Help customers with product questions and ordering".to_string(),
            icon: "shopping".to_string(),
            color: "green".to_string(),
            category: "Sales".to_string(),
            complexity: Complexity::Complex,
            content: serde_json::json!({ "flows": [], "settings": {} }),
        },
        Template {
            id: TemplateId(3),
            name: "Business FAQ".to_string(),
            description: "Answer frequently asked questions about your business".to_string(),
            icon: "business".to_string(),
            color: "purple".to_string(),
            category: "Information".to_string(),
            complexity: Complexity::Simple,
            content: serde_json::json!({ "flows": [], "settings": {} }),
        },
        Template {
            id: TemplateId(4),
            name: "Website Guide".to_string(),
            description: "Help visitors navigate your website and find information".to_string(),
            icon: "website".to_string(),
            color: "orange".to_string(),
            category: "Navigation".to_string(),
            complexity: Complexity::Simple,
            content: serde_json::json!({ "flows": [], "settings": {} }),
        },
    ]
}
