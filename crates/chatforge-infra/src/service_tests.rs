//! Behavior tests wiring the core services over the in-memory store.
//!
//! These exercise the cross-entity flows end to end: registration,
//! quota enforcement, ownership checks, the conversation turn cycle,
//! settings lazy creation, and plan upgrades.

use std::sync::Arc;

use chatforge_core::chat::service::ConversationService;
use chatforge_core::llm::CompletionService;
use chatforge_core::service::account::{AccountService, RegisterRequest};
use chatforge_core::service::billing::BillingService;
use chatforge_core::service::chatbot::ChatbotService;
use chatforge_core::service::hash::PasswordHasher;
use chatforge_core::service::settings::SettingsService;
use chatforge_types::chatbot::{ChatbotId, ChatbotPatch, ChatbotStatus, NewChatbot};
use chatforge_types::error::{AccountError, ChatbotError, ConversationError};
use chatforge_types::llm::{CompletionError, CompletionRequest, MessageRole, ModelInfo};
use chatforge_types::settings::ApiSettings;
use chatforge_types::user::{User, UserId};

use crate::memory::{
    InMemoryChatbotRepository, InMemoryConversationRepository, InMemoryPlanRepository,
    InMemorySettingsRepository, InMemorySubscriptionRepository, InMemoryUserRepository,
};
use crate::seed;

/// Transparent hasher so tests do not pay the argon2 cost per call.
struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, AccountError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash == format!("plain:{password}")
    }
}

/// Completion service returning a canned reply, or failing on demand.
struct CannedCompletion {
    reply: Option<String>,
}

impl CannedCompletion {
    fn ok(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
        }
    }

    fn failing() -> Self {
        Self { reply: None }
    }
}

impl CompletionService for CannedCompletion {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(CompletionError::Provider {
                message: "upstream 503".to_string(),
            }),
        }
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, CompletionError> {
        Ok(vec![0.1, 0.2])
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, CompletionError> {
        Ok(vec![])
    }
}

type TestAccountService =
    AccountService<Arc<InMemoryUserRepository>, Arc<InMemorySubscriptionRepository>, PlainHasher>;

fn account_service(
    users: &Arc<InMemoryUserRepository>,
    subscriptions: &Arc<InMemorySubscriptionRepository>,
) -> TestAccountService {
    AccountService::new(Arc::clone(users), Arc::clone(subscriptions), PlainHasher)
}

async fn register(accounts: &TestAccountService, username: &str) -> User {
    let (user, _) = accounts
        .register(RegisterRequest {
            username: username.to_string(),
            password: "hunter2".to_string(),
            email: format!("{username}@example.com"),
        })
        .await
        .unwrap();
    user
}

fn draft_chatbot(name: &str) -> NewChatbot {
    NewChatbot {
        user_id: UserId(0),
        name: name.to_string(),
        description: None,
        status: None,
        color: None,
        appearance: None,
        settings: None,
        ai_settings: None,
        flows: None,
    }
}

#[tokio::test]
async fn registration_creates_one_user_and_one_basic_subscription() {
    let users = Arc::new(InMemoryUserRepository::new());
    let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
    let accounts = account_service(&users, &subscriptions);

    let (user, subscription) = accounts
        .register(RegisterRequest {
            username: "mira".to_string(),
            password: "hunter2".to_string(),
            email: "mira@example.com".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(subscription.user_id, user.id);
    assert_eq!(subscription.plan_id, "basic");
    assert_eq!(
        (subscription.renewal_date - subscription.start_date).num_days(),
        30
    );

    // Exactly one subscription: the repository rejects another.
    use chatforge_core::repository::SubscriptionRepository;
    let again = subscriptions
        .create(chatforge_types::subscription::NewSubscription {
            user_id: user.id,
            plan_id: "pro".to_string(),
            status: Default::default(),
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            renewal_date: subscription.renewal_date,
        })
        .await;
    assert!(again.is_err());
}

#[tokio::test]
async fn registration_rejects_taken_username() {
    let users = Arc::new(InMemoryUserRepository::new());
    let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
    let accounts = account_service(&users, &subscriptions);

    register(&accounts, "mira").await;
    let err = accounts
        .register(RegisterRequest {
            username: "mira".to_string(),
            password: "other".to_string(),
            email: "second@example.com".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::UsernameTaken(_)));
}

#[tokio::test]
async fn login_collapses_missing_user_and_bad_password() {
    let users = Arc::new(InMemoryUserRepository::new());
    let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
    let accounts = account_service(&users, &subscriptions);
    register(&accounts, "mira").await;

    let wrong = accounts.login("mira", "wrong").await.unwrap_err();
    assert!(matches!(wrong, AccountError::InvalidCredentials));
    let missing = accounts.login("nobody", "hunter2").await.unwrap_err();
    assert!(matches!(missing, AccountError::InvalidCredentials));

    assert!(accounts.login("mira", "hunter2").await.is_ok());
}

#[tokio::test]
async fn change_password_requires_current() {
    let users = Arc::new(InMemoryUserRepository::new());
    let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
    let accounts = account_service(&users, &subscriptions);
    let user = register(&accounts, "mira").await;

    let err = accounts
        .change_password(user.id, "wrong", "new-password")
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::IncorrectPassword));

    accounts
        .change_password(user.id, "hunter2", "new-password")
        .await
        .unwrap();
    assert!(accounts.login("mira", "new-password").await.is_ok());
}

#[tokio::test]
async fn basic_plan_allows_three_chatbots_and_rejects_the_fourth() {
    let users = Arc::new(InMemoryUserRepository::new());
    let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
    let chatbots = Arc::new(InMemoryChatbotRepository::new());
    let plans = Arc::new(InMemoryPlanRepository::new(seed::default_plans()));

    let accounts = account_service(&users, &subscriptions);
    let user = register(&accounts, "mira").await;

    let service = ChatbotService::new(
        Arc::clone(&chatbots),
        Arc::clone(&subscriptions),
        Arc::clone(&plans),
    );

    for n in 1..=3 {
        service
            .create(user.id, draft_chatbot(&format!("Bot {n}")))
            .await
            .unwrap();
    }

    let err = service
        .create(user.id, draft_chatbot("Bot 4"))
        .await
        .unwrap_err();
    assert!(matches!(err, ChatbotError::QuotaExceeded { limit: 3 }));
}

#[tokio::test]
async fn non_owner_mutation_is_forbidden_missing_id_is_not_found() {
    let users = Arc::new(InMemoryUserRepository::new());
    let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
    let chatbots = Arc::new(InMemoryChatbotRepository::new());
    let plans = Arc::new(InMemoryPlanRepository::new(seed::default_plans()));

    let accounts = account_service(&users, &subscriptions);
    let owner = register(&accounts, "owner").await;
    let intruder = register(&accounts, "intruder").await;

    let service = ChatbotService::new(
        Arc::clone(&chatbots),
        Arc::clone(&subscriptions),
        Arc::clone(&plans),
    );
    let bot = service.create(owner.id, draft_chatbot("Mine")).await.unwrap();

    let patch = ChatbotPatch {
        name: Some("Stolen".to_string()),
        ..Default::default()
    };
    let err = service
        .update_owned(bot.id, intruder.id, patch.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, ChatbotError::Forbidden));

    let err = service
        .update_owned(ChatbotId(999), intruder.id, patch)
        .await
        .unwrap_err();
    assert!(matches!(err, ChatbotError::NotFound));

    let err = service.delete_owned(bot.id, intruder.id).await.unwrap_err();
    assert!(matches!(err, ChatbotError::Forbidden));
}

async fn active_chatbot(
    chatbots: &Arc<InMemoryChatbotRepository>,
    owner: UserId,
) -> chatforge_types::chatbot::Chatbot {
    use chatforge_core::repository::ChatbotRepository;
    chatbots
        .create(NewChatbot {
            user_id: owner,
            status: Some(ChatbotStatus::Active),
            ..draft_chatbot("Aria")
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn turn_appends_user_then_assistant() {
    let chatbots = Arc::new(InMemoryChatbotRepository::new());
    let conversations = Arc::new(InMemoryConversationRepository::new());
    let bot = active_chatbot(&chatbots, UserId(1)).await;

    let service = ConversationService::new(
        Arc::clone(&conversations),
        Arc::clone(&chatbots),
        CannedCompletion::ok("Hello! How can I help?"),
    );

    let outcome = service.respond(bot.id, None, "Hi").await.unwrap();
    assert_eq!(outcome.reply, "Hello! How can I help?");

    use chatforge_core::repository::ConversationRepository;
    let conversation = conversations
        .get(outcome.conversation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[0].role, MessageRole::User);
    assert_eq!(conversation.messages[0].content, "Hi");
    assert_eq!(conversation.messages[1].role, MessageRole::Assistant);
    assert_eq!(conversation.messages[1].content, "Hello! How can I help?");
}

#[tokio::test]
async fn failed_generation_leaves_dangling_user_turn() {
    let chatbots = Arc::new(InMemoryChatbotRepository::new());
    let conversations = Arc::new(InMemoryConversationRepository::new());
    let bot = active_chatbot(&chatbots, UserId(1)).await;

    let service = ConversationService::new(
        Arc::clone(&conversations),
        Arc::clone(&chatbots),
        CannedCompletion::failing(),
    );

    let err = service.respond(bot.id, None, "Hi").await.unwrap_err();
    assert!(matches!(err, ConversationError::Generation(_)));

    // The user message was committed before the completion call.
    use chatforge_core::repository::ConversationRepository;
    let conversation = conversations
        .list_by_chatbot(bot.id)
        .await
        .unwrap()
        .into_iter()
        .next()
        .unwrap();
    assert_eq!(conversation.messages.len(), 1);
    assert_eq!(conversation.messages[0].role, MessageRole::User);
}

#[tokio::test]
async fn widget_rejects_inactive_chatbot() {
    let chatbots = Arc::new(InMemoryChatbotRepository::new());
    let conversations = Arc::new(InMemoryConversationRepository::new());

    use chatforge_core::repository::ChatbotRepository;
    let bot = chatbots.create(draft_chatbot("Draft Bot")).await.unwrap();

    let service = ConversationService::new(
        Arc::clone(&conversations),
        Arc::clone(&chatbots),
        CannedCompletion::ok("unused"),
    );

    let err = service.respond(bot.id, None, "Hi").await.unwrap_err();
    assert!(matches!(err, ConversationError::ChatbotInactive));
}

#[tokio::test]
async fn continuing_a_conversation_carries_history() {
    let chatbots = Arc::new(InMemoryChatbotRepository::new());
    let conversations = Arc::new(InMemoryConversationRepository::new());
    let bot = active_chatbot(&chatbots, UserId(1)).await;

    let service = ConversationService::new(
        Arc::clone(&conversations),
        Arc::clone(&chatbots),
        CannedCompletion::ok("Sure."),
    );

    let first = service.respond(bot.id, None, "Hi").await.unwrap();
    let second = service
        .respond(bot.id, Some(first.conversation_id), "And another thing")
        .await
        .unwrap();
    assert_eq!(second.conversation_id, first.conversation_id);

    use chatforge_core::repository::ConversationRepository;
    let conversation = conversations
        .get(first.conversation_id)
        .await
        .unwrap()
        .unwrap();
    let contents: Vec<&str> = conversation
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(contents, ["Hi", "Sure.", "And another thing", "Sure."]);
}

#[tokio::test]
async fn settings_created_lazily_and_sections_replace() {
    let repo = Arc::new(InMemorySettingsRepository::new());
    let service = SettingsService::new(Arc::clone(&repo));

    let first = service.get_or_create(UserId(1)).await.unwrap();
    assert_eq!(first.api.default_model, "gpt-4o");

    // Second read returns the same record, not a new one.
    let second = service.get_or_create(UserId(1)).await.unwrap();
    assert_eq!(second.id, first.id);

    let updated = service
        .update_api(
            UserId(1),
            ApiSettings {
                api_key: "sk-mine".to_string(),
                default_model: "gpt-4o-mini".to_string(),
                rate_limit: 10,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.api.api_key, "sk-mine");
    assert_eq!(updated.notifications, first.notifications);
}

#[tokio::test]
async fn upgrade_mutates_the_single_subscription() {
    let users = Arc::new(InMemoryUserRepository::new());
    let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
    let plans = Arc::new(InMemoryPlanRepository::new(seed::default_plans()));

    let accounts = account_service(&users, &subscriptions);
    let user = register(&accounts, "mira").await;

    let billing = BillingService::new(Arc::clone(&subscriptions), Arc::clone(&plans));

    let before = billing.overview(user.id).await.unwrap();
    assert_eq!(before.current_plan.id, "basic");

    let upgraded = billing.upgrade(user.id, "pro").await.unwrap();
    assert_eq!(upgraded.plan_id, "pro");
    assert_eq!(upgraded.id, before.subscription.id);
    assert_eq!((upgraded.renewal_date - upgraded.start_date).num_days(), 30);

    let err = billing.upgrade(user.id, "platinum").await.unwrap_err();
    assert!(matches!(
        err,
        chatforge_types::error::BillingError::PlanNotFound
    ));
}
