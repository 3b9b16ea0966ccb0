//! Configuration management
//!
//! Handles:
//! - Poll cadence and debug verbosity
//! - Router API endpoint and credentials
//! - MQTT broker settings for alert events
//! - WAN-less model list

use anyhow::{Context, Result};
use clientstatus_core::DEFAULT_MODELS_WITHOUT_WAN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "CLIENT_STATUS_CONFIG";
pub const INTERVAL_ENV: &str = "CLIENT_STATUS_INTERVAL_SECS";
pub const DEBUG_ENV: &str = "CLIENT_STATUS_DEBUG";
pub const ROUTER_PASSWORD_ENV: &str = "CLIENT_STATUS_ROUTER_PASSWORD";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub poll: PollConfig,
    pub router: RouterConfig,
    pub mqtt: MqttConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_secs: u64,
    pub debug: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub base_url: String,
    pub username: String,
    #[serde(skip_serializing)] // Never write the password back to disk
    pub password: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    pub broker_host: String,
    pub broker_port: u16,
    pub client_id: Option<String>,
    pub keep_alive_secs: u64,
    pub topic_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub without_wan: Vec<String>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3600,
            debug: false,
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_url: "http://192.168.0.1".to_string(),
            username: "admin".to_string(),
            password: None,
            request_timeout_secs: 10,
        }
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: None,
            keep_alive_secs: 30,
            topic_prefix: "clientstatus/events".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            without_wan: DEFAULT_MODELS_WITHOUT_WAN
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl RouterConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl MqttConfig {
    /// Configured client id, or a unique one per process
    pub fn client_id(&self) -> String {
        self.client_id
            .clone()
            .unwrap_or_else(|| format!("clientstatus-{}", uuid::Uuid::new_v4().simple()))
    }
}

impl AgentConfig {
    /// Load from `$CLIENT_STATUS_CONFIG` or the OS config dir, then apply env overrides
    pub async fn load() -> Result<Self> {
        let path = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => PathBuf::from(path),
            Err(_) => Self::config_file_path()?,
        };

        let mut config = Self::load_from(&path).await?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file; a missing file yields the defaults
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Apply overrides looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(INTERVAL_ENV) {
            self.poll.interval_secs = value
                .trim()
                .parse()
                .with_context(|| format!("{INTERVAL_ENV} must be a number of seconds"))?;
        }
        if let Some(value) = lookup(DEBUG_ENV) {
            self.poll.debug = matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(value) = lookup(ROUTER_PASSWORD_ENV) {
            self.router.password = Some(value);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll.interval_secs == 0 {
            anyhow::bail!("poll.interval_secs must be greater than zero");
        }
        if self.router.request_timeout_secs == 0 {
            anyhow::bail!("router.request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Get OS-specific config file path
    pub fn config_file_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;

        path.push("client-status");
        path.push("config.toml");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.poll.interval_secs, 3600);
        assert!(!config.poll.debug);
        assert_eq!(config.mqtt.broker_port, 1883);
        assert_eq!(config.models.without_wan.len(), DEFAULT_MODELS_WITHOUT_WAN.len());
        config.validate().unwrap();
    }

    #[test]
    fn test_config_file_path() {
        let path = AgentConfig::config_file_path().unwrap();
        assert!(path.to_string_lossy().contains("client-status"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AgentConfig::load_from(&dir.path().join("absent.toml")).await.unwrap();
        assert_eq!(config.poll.interval_secs, 3600);
    }

    #[tokio::test]
    async fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[poll]
interval_secs = 600

[router]
base_url = "http://10.0.0.1"
password = "hunter2"

[models]
without_wan = ["E102"]
"#,
        )
        .unwrap();

        let config = AgentConfig::load_from(&path).await.unwrap();
        assert_eq!(config.poll.interval_secs, 600);
        assert!(!config.poll.debug);
        assert_eq!(config.router.base_url, "http://10.0.0.1");
        assert_eq!(config.router.username, "admin");
        assert_eq!(config.router.password.as_deref(), Some("hunter2"));
        assert_eq!(config.models.without_wan, vec!["E102"]);
        assert_eq!(config.mqtt.topic_prefix, "clientstatus/events");
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[poll]\ninterval_secs = \"hourly\"\n").unwrap();
        assert!(AgentConfig::load_from(&path).await.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (INTERVAL_ENV, "60"),
            (DEBUG_ENV, "true"),
            (ROUTER_PASSWORD_ENV, "s3cret"),
        ]
        .into_iter()
        .collect();

        let mut config = AgentConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.poll.interval(), Duration::from_secs(60));
        assert!(config.poll.debug);
        assert_eq!(config.router.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_bad_interval_override_is_rejected() {
        let mut config = AgentConfig::default();
        assert!(config
            .apply_env(|key| (key == INTERVAL_ENV).then(|| "soon".to_string()))
            .is_err());

        config.poll.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_password_is_not_serialized() {
        let mut config = AgentConfig::default();
        config.router.password = Some("hunter2".into());
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_generated_client_ids_are_unique() {
        let mqtt = MqttConfig::default();
        assert_ne!(mqtt.client_id(), mqtt.client_id());
        assert!(mqtt.client_id().starts_with("clientstatus-"));
    }
}
