//! Per-user settings service with lazy default creation.

use chatforge_types::error::RepositoryError;
use chatforge_types::settings::{
    ApiSettings, AppearanceSettings, NewSettings, NotificationSettings, SettingsPatch,
    UserSettings,
};
use chatforge_types::user::UserId;
use tracing::debug;

use crate::repository::SettingsRepository;

/// Orchestrates per-user settings. A user's record is created with
/// defaults the first time it is read; section updates replace the
/// targeted section wholesale.
pub struct SettingsService<R: SettingsRepository> {
    settings: R,
}

impl<R: SettingsRepository> SettingsService<R> {
    pub fn new(settings: R) -> Self {
        Self { settings }
    }

    /// Fetch the user's settings, creating the defaults on first read.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<UserSettings, RepositoryError> {
        if let Some(existing) = self.settings.get_by_user(user_id).await? {
            return Ok(existing);
        }

        debug!(user_id = %user_id, "creating default settings");
        self.settings.create(NewSettings::defaults(user_id)).await
    }

    /// Replace the API section.
    pub async fn update_api(
        &self,
        user_id: UserId,
        api: ApiSettings,
    ) -> Result<UserSettings, RepositoryError> {
        self.patch_section(
            user_id,
            SettingsPatch {
                api: Some(api),
                ..Default::default()
            },
        )
        .await
    }

    /// Replace the notifications section.
    pub async fn update_notifications(
        &self,
        user_id: UserId,
        notifications: NotificationSettings,
    ) -> Result<UserSettings, RepositoryError> {
        self.patch_section(
            user_id,
            SettingsPatch {
                notifications: Some(notifications),
                ..Default::default()
            },
        )
        .await
    }

    /// Replace the appearance section.
    pub async fn update_appearance(
        &self,
        user_id: UserId,
        appearance: AppearanceSettings,
    ) -> Result<UserSettings, RepositoryError> {
        self.patch_section(
            user_id,
            SettingsPatch {
                appearance: Some(appearance),
                ..Default::default()
            },
        )
        .await
    }

    /// Apply a section patch against the (lazily created) record.
    async fn patch_section(
        &self,
        user_id: UserId,
        patch: SettingsPatch,
    ) -> Result<UserSettings, RepositoryError> {
        let current = self.get_or_create(user_id).await?;
        self.settings
            .update(current.id, patch)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}
