use crate::{
    constants::{
        AGENT_ALIAS_ID_VAR, AGENT_ID_VAR, API_KEY_VAR, APP_DIR_NAME, DEFAULT_RESPONSE_DELAY_MS,
    },
    errors::{AssistantError, AssistantResult},
};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];
const MAX_RESPONSE_DELAY_MS: u64 = 60_000;

/// Application config, read from `~/.config/devops-assistant/config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Artificial latency before every reply, in both modes.
    pub response_delay_ms: u64,
    /// Client-side limit for remote calls. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
    pub storage_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            response_delay_ms: DEFAULT_RESPONSE_DELAY_MS,
            request_timeout_secs: None,
            log_level: "info".to_string(),
            storage_path: None,
            log_dir: None,
        }
    }
}

impl Config {
    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Location of the persisted settings store.
    pub fn storage_path(&self) -> AssistantResult<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => {
                let data_dir = dirs::data_dir().ok_or_else(|| {
                    AssistantError::config_error("Could not determine data directory")
                })?;
                Ok(data_dir.join(APP_DIR_NAME).join("local_storage.json"))
            }
        }
    }

    pub fn log_dir(&self) -> AssistantResult<PathBuf> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let cache_dir = dirs::cache_dir().ok_or_else(|| {
                    AssistantError::config_error("Could not determine cache directory")
                })?;
                Ok(cache_dir.join(APP_DIR_NAME).join("logs"))
            }
        }
    }
}

pub fn default_config_path() -> AssistantResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| AssistantError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join(APP_DIR_NAME).join("config.json"))
}

/// Loads the config at `path`, writing a default one first if none exists.
pub fn load_config(path: &Path) -> AssistantResult<Config> {
    if !path.exists() {
        let config = Config::default();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AssistantError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        let config_str = serde_json::to_string_pretty(&config).map_err(|e| {
            AssistantError::config_error(format!("Failed to serialize config: {}", e))
        })?;
        fs::write(path, config_str).map_err(|e| {
            AssistantError::config_error(format!("Failed to write config file: {}", e))
        })?;

        return Ok(config);
    }

    let config_str = fs::read_to_string(path)
        .map_err(|e| AssistantError::config_error(format!("Failed to read config file: {}", e)))?;
    let config: Config = serde_json::from_str(&config_str)
        .map_err(|e| AssistantError::config_error(format!("Failed to parse config: {}", e)))?;

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> AssistantResult<()> {
    if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        return Err(AssistantError::config_error(format!(
            "Unknown log level '{}'",
            config.log_level
        )));
    }

    if config.response_delay_ms > MAX_RESPONSE_DELAY_MS {
        return Err(AssistantError::config_error(
            "response_delay_ms must not exceed 60000",
        ));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(AssistantError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    Ok(())
}

/// Deployment identifiers supplied by the environment, never edited in the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub api_key: Option<String>,
    pub agent_id: Option<String>,
    pub agent_alias_id: Option<String>,
}

impl DeploymentConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            api_key: read(API_KEY_VAR),
            agent_id: read(AGENT_ID_VAR),
            agent_alias_id: read(AGENT_ALIAS_ID_VAR),
        }
    }
}
