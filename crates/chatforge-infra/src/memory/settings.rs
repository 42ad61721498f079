//! In-memory settings repository.

use dashmap::DashMap;

use chatforge_core::repository::SettingsRepository;
use chatforge_types::error::RepositoryError;
use chatforge_types::settings::{NewSettings, SettingsId, SettingsPatch, UserSettings};
use chatforge_types::user::UserId;

use super::IdSequence;

/// `DashMap`-backed settings store, one record per user.
#[derive(Debug, Default)]
pub struct InMemorySettingsRepository {
    settings: DashMap<SettingsId, UserSettings>,
    ids: IdSequence,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsRepository for InMemorySettingsRepository {
    async fn get(&self, id: SettingsId) -> Result<Option<UserSettings>, RepositoryError> {
        Ok(self.settings.get(&id).map(|entry| entry.clone()))
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Option<UserSettings>, RepositoryError> {
        Ok(self
            .settings
            .iter()
            .find(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone()))
    }

    async fn create(&self, settings: NewSettings) -> Result<UserSettings, RepositoryError> {
        if self.get_by_user(settings.user_id).await?.is_some() {
            return Err(RepositoryError::Conflict(format!(
                "user {} already has settings",
                settings.user_id
            )));
        }

        let id = SettingsId(self.ids.next());
        let record = UserSettings {
            id,
            user_id: settings.user_id,
            api: settings.api,
            notifications: settings.notifications,
            appearance: settings.appearance,
        };
        self.settings.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: SettingsId,
        patch: SettingsPatch,
    ) -> Result<Option<UserSettings>, RepositoryError> {
        let Some(mut entry) = self.settings.get_mut(&id) else {
            return Ok(None);
        };

        // Sections are atomic: each replaces the whole stored object.
        if let Some(api) = patch.api {
            entry.api = api;
        }
        if let Some(notifications) = patch.notifications {
            entry.notifications = notifications;
        }
        if let Some(appearance) = patch.appearance {
            entry.appearance = appearance;
        }

        Ok(Some(entry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatforge_types::settings::{ApiSettings, AppearanceSettings};

    #[tokio::test]
    async fn test_create_then_get_by_user() {
        let repo = InMemorySettingsRepository::new();
        let created = repo.create(NewSettings::defaults(UserId(1))).await.unwrap();

        let fetched = repo.get_by_user(UserId(1)).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert!(repo.get_by_user(UserId(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let repo = InMemorySettingsRepository::new();
        repo.create(NewSettings::defaults(UserId(1))).await.unwrap();
        let second = repo.create(NewSettings::defaults(UserId(1))).await;
        assert!(matches!(second, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_section_patch_replaces_only_that_section() {
        let repo = InMemorySettingsRepository::new();
        let created = repo.create(NewSettings::defaults(UserId(1))).await.unwrap();

        let updated = repo
            .update(
                created.id,
                SettingsPatch {
                    api: Some(ApiSettings {
                        api_key: "sk-user".to_string(),
                        default_model: "gpt-4o-mini".to_string(),
                        rate_limit: 10,
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.api.api_key, "sk-user");
        assert_eq!(updated.api.rate_limit, 10);
        // Other sections untouched.
        assert_eq!(updated.appearance, AppearanceSettings::default());
        assert_eq!(updated.notifications, created.notifications);
    }
}
