//! In-memory chatbot repository.

use chrono::Utc;
use dashmap::DashMap;

use chatforge_core::repository::ChatbotRepository;
use chatforge_types::chatbot::{Chatbot, ChatbotId, ChatbotPatch, ChatbotStatus, NewChatbot};
use chatforge_types::error::RepositoryError;
use chatforge_types::user::UserId;

use super::IdSequence;

/// `DashMap`-backed chatbot store.
#[derive(Debug, Default)]
pub struct InMemoryChatbotRepository {
    chatbots: DashMap<ChatbotId, Chatbot>,
    ids: IdSequence,
}

impl InMemoryChatbotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChatbotRepository for InMemoryChatbotRepository {
    async fn get(&self, id: ChatbotId) -> Result<Option<Chatbot>, RepositoryError> {
        Ok(self.chatbots.get(&id).map(|entry| entry.clone()))
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Chatbot>, RepositoryError> {
        let mut owned: Vec<Chatbot> = self
            .chatbots
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect();
        // Ids are assigned in insertion order; sorting restores it.
        owned.sort_by_key(|c| c.id);
        Ok(owned)
    }

    async fn count_by_user(&self, user_id: UserId) -> Result<usize, RepositoryError> {
        Ok(self
            .chatbots
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .count())
    }

    async fn create(&self, chatbot: NewChatbot) -> Result<Chatbot, RepositoryError> {
        let id = ChatbotId(self.ids.next());
        let now = Utc::now();
        let record = Chatbot {
            id,
            user_id: chatbot.user_id,
            name: chatbot.name,
            description: chatbot.description,
            status: chatbot.status.unwrap_or(ChatbotStatus::Draft),
            color: chatbot.color.unwrap_or_else(|| "primary".to_string()),
            appearance: chatbot.appearance.unwrap_or_default(),
            settings: chatbot
                .settings
                .unwrap_or_else(|| serde_json::json!({})),
            ai_settings: chatbot.ai_settings.unwrap_or_default(),
            flows: chatbot.flows.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.chatbots.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: ChatbotId,
        patch: ChatbotPatch,
    ) -> Result<Option<Chatbot>, RepositoryError> {
        let Some(mut entry) = self.chatbots.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(description) = patch.description {
            entry.description = Some(description);
        }
        if let Some(status) = patch.status {
            entry.status = status;
        }
        if let Some(color) = patch.color {
            entry.color = color;
        }
        // Nested objects replace wholesale -- no deep merge.
        if let Some(appearance) = patch.appearance {
            entry.appearance = appearance;
        }
        if let Some(settings) = patch.settings {
            entry.settings = settings;
        }
        if let Some(ai_settings) = patch.ai_settings {
            entry.ai_settings = ai_settings;
        }
        if let Some(flows) = patch.flows {
            entry.flows = flows;
        }
        entry.updated_at = Utc::now();

        Ok(Some(entry.clone()))
    }

    async fn delete(&self, id: ChatbotId) -> Result<bool, RepositoryError> {
        Ok(self.chatbots.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatforge_types::chatbot::{AiSettings, Appearance};

    fn new_chatbot(user: i64, name: &str) -> NewChatbot {
        NewChatbot {
            user_id: UserId(user),
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
    async fn test_create_fills_stated_defaults() {
        let repo = InMemoryChatbotRepository::new();
        let created = repo.create(new_chatbot(1, "Aria")).await.unwrap();

        assert_eq!(created.id, ChatbotId(1));
        assert_eq!(created.status, ChatbotStatus::Draft);
        assert_eq!(created.color, "primary");
        assert!(created.flows.is_empty());
        assert_eq!(created.appearance, Appearance::default());
        assert_eq!(created.ai_settings, AiSettings::default());

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Aria");
    }

    #[tokio::test]
    async fn test_nested_appearance_replaces_wholesale() {
        let repo = InMemoryChatbotRepository::new();
        let created = repo
            .create(NewChatbot {
                appearance: Some(Appearance {
                    primary_color: "#fff".to_string(),
                    font_family: "Inter".to_string(),
                    border_radius: 12,
                    position: "bottom-left".to_string(),
                }),
                ..new_chatbot(1, "Aria")
            })
            .await
            .unwrap();

        // Patch with a default-bodied appearance carrying a new color:
        // every other appearance field must come from the patch object,
        // not survive from the stored one.
        let updated = repo
            .update(
                created.id,
                ChatbotPatch {
                    appearance: Some(Appearance {
                        primary_color: "#000".to_string(),
                        ..Appearance::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.appearance.primary_color, "#000");
        assert_eq!(updated.appearance.border_radius, Appearance::default().border_radius);
        assert_eq!(updated.appearance.position, Appearance::default().position);
        // Scalar fields untouched.
        assert_eq!(updated.name, "Aria");
    }

    #[tokio::test]
    async fn test_patch_bumps_updated_at() {
        let repo = InMemoryChatbotRepository::new();
        let created = repo.create(new_chatbot(1, "Aria")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                ChatbotPatch {
                    status: Some(ChatbotStatus::Active),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, ChatbotStatus::Active);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let repo = InMemoryChatbotRepository::new();
        let created = repo.create(new_chatbot(1, "Aria")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get(created.id).await.unwrap().is_none());
        // Deleting again reports absence, never errors.
        assert!(!repo.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let repo = InMemoryChatbotRepository::new();
        let first = repo.create(new_chatbot(1, "One")).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.create(new_chatbot(1, "Two")).await.unwrap();
        assert_eq!(second.id, ChatbotId(2));
    }

    #[tokio::test]
    async fn test_list_by_user_in_creation_order() {
        let repo = InMemoryChatbotRepository::new();
        repo.create(new_chatbot(1, "First")).await.unwrap();
        repo.create(new_chatbot(2, "Other")).await.unwrap();
        repo.create(new_chatbot(1, "Second")).await.unwrap();
        repo.create(new_chatbot(1, "Third")).await.unwrap();

        let owned = repo.list_by_user(UserId(1)).await.unwrap();
        let names: Vec<&str> = owned.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
        assert_eq!(repo.count_by_user(UserId(1)).await.unwrap(), 3);
        assert_eq!(repo.count_by_user(UserId(2)).await.unwrap(), 1);
    }
}
