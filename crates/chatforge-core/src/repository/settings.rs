//! Settings repository trait definition.

use chatforge_types::error::RepositoryError;
use chatforge_types::settings::{NewSettings, SettingsId, SettingsPatch, UserSettings};
use chatforge_types::user::UserId;

/// Repository trait for per-user settings persistence.
pub trait SettingsRepository: Send + Sync {
    fn get(
        &self,
        id: SettingsId,
    ) -> impl std::future::Future<Output = Result<Option<UserSettings>, RepositoryError>> + Send;

    /// Linear scan for the user's unique settings record.
    fn get_by_user(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<UserSettings>, RepositoryError>> + Send;

    fn create(
        &self,
        settings: NewSettings,
    ) -> impl std::future::Future<Output = Result<UserSettings, RepositoryError>> + Send;

    /// Apply a section patch. Sections are atomic: a `Some` section
    /// replaces the stored object wholesale.
    fn update(
        &self,
        id: SettingsId,
        patch: SettingsPatch,
    ) -> impl std::future::Future<Output = Result<Option<UserSettings>, RepositoryError>> + Send;
}

impl<T: SettingsRepository> SettingsRepository for std::sync::Arc<T> {
    async fn get(&self, id: SettingsId) -> Result<Option<UserSettings>, RepositoryError> {
        (**self).get(id).await
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Option<UserSettings>, RepositoryError> {
        (**self).get_by_user(user_id).await
    }

    async fn create(&self, settings: NewSettings) -> Result<UserSettings, RepositoryError> {
        (**self).create(settings).await
    }

    async fn update(
        &self,
        id: SettingsId,
        patch: SettingsPatch,
    ) -> Result<Option<UserSettings>, RepositoryError> {
        (**self).update(id, patch).await
    }
}
