//! Application configuration loader.
//!
//! Reads `chatforge.toml` and deserializes it into [`AppConfig`]. Falls
//! back to sensible defaults when the file is missing or malformed
//! (warn, never fail), then applies environment overrides for the bind
//! address and provider API key.

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub retry: RetryConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Completion-provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider API key. Usually supplied via `OPENAI_API_KEY` instead
    /// of the config file.
    pub api_key: Option<SecretString>,
    pub default_model: String,
    /// Override for OpenAI-compatible gateways; the provider default
    /// endpoint is used when absent.
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: "gpt-4o".to_string(),
            base_url: None,
        }
    }
}

/// Retry policy knobs for the completion service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 250,
            max_backoff_ms: 4_000,
        }
    }
}

/// Load configuration from `path`.
///
/// - Missing file: returns [`AppConfig::default()`].
/// - Unreadable or unparseable file: logs a warning and returns the
///   default.
pub async fn load_config(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Apply environment overrides: `CHATFORGE_BIND` for the bind address,
/// `OPENAI_API_KEY` for the provider key (only when the file set none).
pub fn apply_env_overrides(mut config: AppConfig) -> AppConfig {
    if let Ok(bind) = std::env::var("CHATFORGE_BIND") {
        config.server.bind_addr = bind;
    }
    if config.provider.api_key.is_none()
        && let Ok(key) = std::env::var("OPENAI_API_KEY")
    {
        config.provider.api_key = Some(SecretString::from(key));
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("chatforge.toml")).await;
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.provider.default_model, "gpt-4o");
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("chatforge.toml");
        tokio::fs::write(
            &path,
            r#"
[server]
bind_addr = "0.0.0.0:9000"

[provider]
api_key = "sk-test"
default_model = "gpt-4o-mini"

[retry]
max_attempts = 5
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.provider.default_model, "gpt-4o-mini");
        assert_eq!(
            config.provider.api_key.unwrap().expose_secret(),
            "sk-test"
        );
        assert_eq!(config.retry.max_attempts, 5);
        // Unset retry fields keep their defaults.
        assert_eq!(config.retry.initial_backoff_ms, 250);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("chatforge.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
    }
}
