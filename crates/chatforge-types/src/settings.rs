use serde::{Deserialize, Serialize};

use std::fmt;

use crate::user::UserId;

/// Unique identifier for a settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SettingsId(pub i64);

impl fmt::Display for SettingsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-user provider API configuration. Replaced atomically on update.
/// Fields missing from an incoming payload are filled from the defaults,
/// not from stored state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// The user's own completion-provider key. Empty until they supply one.
    pub api_key: String,
    pub default_model: String,
    /// Requests per minute the user wants their widgets capped at.
    pub rate_limit: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            default_model: "gpt-4o".to_string(),
            rate_limit: 60,
        }
    }
}

/// Per-user notification toggles. Replaced atomically on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub chatbot_updates: bool,
    pub weekly_reports: bool,
    pub security_alerts: bool,
    pub marketing_emails: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            chatbot_updates: true,
            weekly_reports: true,
            security_alerts: true,
            marketing_emails: false,
        }
    }
}

/// Per-user dashboard appearance. Replaced atomically on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceSettings {
    pub theme: String,
    pub accent_color: String,
    pub sidebar_collapsed: bool,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            accent_color: "#3B82F6".to_string(),
            sidebar_collapsed: false,
        }
    }
}

/// A user's dashboard settings, one record per user.
///
/// Created lazily with defaults on first read. Each sub-section is
/// updated independently and replaced wholesale -- a partial `api` patch
/// never merges into the stored `api` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub id: SettingsId,
    pub user_id: UserId,
    pub api: ApiSettings,
    pub notifications: NotificationSettings,
    pub appearance: AppearanceSettings,
}

/// Input for creating a settings record. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewSettings {
    pub user_id: UserId,
    pub api: ApiSettings,
    pub notifications: NotificationSettings,
    pub appearance: AppearanceSettings,
}

impl NewSettings {
    /// Defaults for lazy creation on first read.
    pub fn defaults(user_id: UserId) -> Self {
        Self {
            user_id,
            api: ApiSettings::default(),
            notifications: NotificationSettings::default(),
            appearance: AppearanceSettings::default(),
        }
    }
}

/// Typed patch for settings. Each section is atomic: setting a section
/// replaces that whole object and leaves the other sections untouched.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub api: Option<ApiSettings>,
    pub notifications: Option<NotificationSettings>,
    pub appearance: Option<AppearanceSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = NewSettings::defaults(UserId(7));
        assert_eq!(settings.api.default_model, "gpt-4o");
        assert_eq!(settings.api.rate_limit, 60);
        assert!(settings.notifications.email_notifications);
        assert!(!settings.notifications.marketing_emails);
        assert_eq!(settings.appearance.theme, "light");
    }
}
