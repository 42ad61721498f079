//! Application state wiring all services together.
//!
//! Services are generic over repository traits, but AppState pins them
//! to the concrete in-memory implementations. Repositories are shared
//! between services through `Arc`, so the dashboard aggregates and the
//! CRUD handlers always see the same store.

use std::sync::Arc;

use chatforge_core::chat::service::ConversationService;
use chatforge_core::llm::{Retrying, RetryPolicy};
use chatforge_core::service::account::AccountService;
use chatforge_core::service::analytics::AnalyticsService;
use chatforge_core::service::billing::BillingService;
use chatforge_core::service::chatbot::ChatbotService;
use chatforge_core::service::settings::SettingsService;
use chatforge_infra::config::AppConfig;
use chatforge_infra::crypto::Argon2PasswordHasher;
use chatforge_infra::llm::OpenAiCompletionService;
use chatforge_infra::memory::{
    InMemoryChatbotRepository, InMemoryConversationRepository, InMemoryPlanRepository,
    InMemorySettingsRepository, InMemorySubscriptionRepository, InMemoryTemplateRepository,
    InMemoryUserRepository,
};
use chatforge_infra::seed;
use chatforge_infra::session::InMemorySessionStore;

/// The completion service as wired in production: the OpenAI client
/// behind the retry decorator.
pub type Completion = Retrying<OpenAiCompletionService>;

/// Concrete type aliases for the service generics pinned to the
/// in-memory implementations.
pub type ConcreteAccountService = AccountService<
    Arc<InMemoryUserRepository>,
    Arc<InMemorySubscriptionRepository>,
    Argon2PasswordHasher,
>;

pub type ConcreteChatbotService = ChatbotService<
    Arc<InMemoryChatbotRepository>,
    Arc<InMemorySubscriptionRepository>,
    Arc<InMemoryPlanRepository>,
>;

pub type ConcreteBillingService =
    BillingService<Arc<InMemorySubscriptionRepository>, Arc<InMemoryPlanRepository>>;

pub type ConcreteSettingsService = SettingsService<Arc<InMemorySettingsRepository>>;

pub type ConcreteAnalyticsService = AnalyticsService<
    Arc<InMemoryChatbotRepository>,
    Arc<InMemoryConversationRepository>,
    Arc<InMemoryTemplateRepository>,
>;

pub type ConcreteConversationService = ConversationService<
    Arc<InMemoryConversationRepository>,
    Arc<InMemoryChatbotRepository>,
    Arc<Completion>,
>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<ConcreteAccountService>,
    pub chatbot_service: Arc<ConcreteChatbotService>,
    pub billing_service: Arc<ConcreteBillingService>,
    pub settings_service: Arc<ConcreteSettingsService>,
    pub analytics_service: Arc<ConcreteAnalyticsService>,
    pub conversation_service: Arc<ConcreteConversationService>,
    pub completion: Arc<Completion>,
    pub sessions: Arc<InMemorySessionStore>,
    pub users: Arc<InMemoryUserRepository>,
    pub conversations: Arc<InMemoryConversationRepository>,
    pub templates: Arc<InMemoryTemplateRepository>,
}

impl AppState {
    /// Wire repositories, seed reference data, and build the services.
    pub fn init(config: &AppConfig) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
        let chatbots = Arc::new(InMemoryChatbotRepository::new());
        let conversations = Arc::new(InMemoryConversationRepository::new());
        let settings = Arc::new(InMemorySettingsRepository::new());
        let plans = Arc::new(InMemoryPlanRepository::new(seed::default_plans()));
        let templates = Arc::new(InMemoryTemplateRepository::new(seed::default_templates()));

        let retry = RetryPolicy {
            max_attempts: config.retry.max_attempts,
            initial_backoff: std::time::Duration::from_millis(config.retry.initial_backoff_ms),
            max_backoff: std::time::Duration::from_millis(config.retry.max_backoff_ms),
        };
        let completion = Arc::new(Retrying::new(
            OpenAiCompletionService::new(&config.provider),
            retry,
        ));

        let account_service = AccountService::new(
            Arc::clone(&users),
            Arc::clone(&subscriptions),
            Argon2PasswordHasher::new(),
        );

        let chatbot_service = ChatbotService::new(
            Arc::clone(&chatbots),
            Arc::clone(&subscriptions),
            Arc::clone(&plans),
        );

        let billing_service =
            BillingService::new(Arc::clone(&subscriptions), Arc::clone(&plans));

        let settings_service = SettingsService::new(Arc::clone(&settings));

        let analytics_service = AnalyticsService::new(
            Arc::clone(&chatbots),
            Arc::clone(&conversations),
            Arc::clone(&templates),
        );

        let conversation_service = ConversationService::new(
            Arc::clone(&conversations),
            Arc::clone(&chatbots),
            Arc::clone(&completion),
        );

        Self {
            account_service: Arc::new(account_service),
            chatbot_service: Arc::new(chatbot_service),
            billing_service: Arc::new(billing_service),
            settings_service: Arc::new(settings_service),
            analytics_service: Arc::new(analytics_service),
            conversation_service: Arc::new(conversation_service),
            completion,
            sessions: Arc::new(InMemorySessionStore::new()),
            users,
            conversations,
            templates,
        }
    }
}
