use crate::{
    constants::{LAMBDA_URL_KEY, USE_MOCK_KEY},
    errors::AssistantResult,
    storage::{FileStore, KeyValueStore, MemoryStore},
};
use std::{fmt, path::PathBuf};

/// Where replies come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Canned replies from the local table.
    #[default]
    Mock,
    /// Replies from the configured remote endpoint.
    Remote,
}

impl ResponseMode {
    pub fn is_mock(self) -> bool {
        matches!(self, ResponseMode::Mock)
    }

    fn as_stored(self) -> &'static str {
        if self.is_mock() {
            "true"
        } else {
            "false"
        }
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseMode::Mock => f.write_str("Mock"),
            ResponseMode::Remote => f.write_str("Lambda"),
        }
    }
}

/// User-editable settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub mode: ResponseMode,
    pub remote_url: String,
}

impl Settings {
    /// One-line summary shown in the settings panel.
    pub fn status_line(&self) -> String {
        match self.mode {
            ResponseMode::Mock => "Using mock responses".to_string(),
            ResponseMode::Remote if self.remote_url.trim().is_empty() => "No Lambda URL set".to_string(),
            ResponseMode::Remote => format!("Using Lambda at {}", self.remote_url),
        }
    }
}

/// Settings backed by a key-value store. Every change is written through.
pub struct SettingsStore {
    settings: Settings,
    store: Box<dyn KeyValueStore>,
}

impl SettingsStore {
    /// Reads both settings from `store`, keeping defaults for absent keys.
    pub fn load(store: Box<dyn KeyValueStore>) -> AssistantResult<Self> {
        let mut settings = Settings::default();

        if let Some(url) = store.get(LAMBDA_URL_KEY)? {
            settings.remote_url = url;
        }
        if let Some(use_mock) = store.get(USE_MOCK_KEY)? {
            settings.mode = if use_mock == "true" {
                ResponseMode::Mock
            } else {
                ResponseMode::Remote
            };
        }

        log::info!(
            "loaded settings: mode={}, url={:?}",
            settings.mode,
            settings.remote_url
        );
        Ok(Self { settings, store })
    }

    /// Default settings over `store`, without reading it.
    fn with_defaults(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            settings: Settings::default(),
            store,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Switches the response mode. The in-memory value changes even if the
    /// write fails; the error is returned so the caller can report it.
    pub fn set_mode(&mut self, mode: ResponseMode) -> AssistantResult<()> {
        if self.settings.mode != mode {
            log::info!("mock setting changed to: {}", mode.is_mock());
        }
        self.settings.mode = mode;
        self.store.set(USE_MOCK_KEY, mode.as_stored())
    }

    /// Replaces the remote URL, with the same write-through rules as `set_mode`.
    pub fn set_remote_url(&mut self, url: impl Into<String>) -> AssistantResult<()> {
        self.settings.remote_url = url.into();
        self.store.set(LAMBDA_URL_KEY, &self.settings.remote_url)
    }
}

/// Opens the persisted settings at `path`.
///
/// A store that cannot be located or read never stops startup: the session
/// falls back to defaults held in memory, and the returned warning says why.
pub fn open_settings_store(path: AssistantResult<PathBuf>) -> (SettingsStore, Option<String>) {
    let opened = path
        .and_then(FileStore::open)
        .and_then(|store| SettingsStore::load(Box::new(store)));

    match opened {
        Ok(settings) => (settings, None),
        Err(e) => {
            log::warn!("settings store unavailable, using defaults: {}", e);
            let fallback = SettingsStore::with_defaults(Box::new(MemoryStore::new()));
            (fallback, Some(format!("Settings will not be saved: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AssistantError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_store_is_empty() {
        let store = SettingsStore::load(Box::new(MemoryStore::new())).unwrap();
        assert_eq!(store.settings(), &Settings::default());
        assert!(store.settings().mode.is_mock());
        assert_eq!(store.settings().remote_url, "");
    }

    #[test]
    fn test_settings_restored_after_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local_storage.json");

        {
            let mut store = SettingsStore::load(Box::new(FileStore::open(&path).unwrap())).unwrap();
            store.set_mode(ResponseMode::Remote).unwrap();
            store.set_remote_url("https://abc.execute-api.us-east-1.amazonaws.com/prod").unwrap();
        }

        let reloaded = SettingsStore::load(Box::new(FileStore::open(&path).unwrap())).unwrap();
        assert_eq!(
            reloaded.settings(),
            &Settings {
                mode: ResponseMode::Remote,
                remote_url: "https://abc.execute-api.us-east-1.amazonaws.com/prod".to_string(),
            }
        );
    }

    #[test]
    fn test_any_stored_value_but_true_means_remote() {
        let mut kv = MemoryStore::new();
        kv.set(USE_MOCK_KEY, "yes").unwrap();
        let store = SettingsStore::load(Box::new(kv)).unwrap();
        assert_eq!(store.settings().mode, ResponseMode::Remote);
    }

    #[test]
    fn test_mode_is_stored_as_text_flag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        let mut store = SettingsStore::load(Box::new(FileStore::open(&path).unwrap())).unwrap();
        store.set_mode(ResponseMode::Remote).unwrap();

        let raw = FileStore::open(&path).unwrap();
        assert_eq!(raw.get(USE_MOCK_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_status_line() {
        let mut settings = Settings::default();
        assert_eq!(settings.status_line(), "Using mock responses");
        settings.mode = ResponseMode::Remote;
        assert_eq!(settings.status_line(), "No Lambda URL set");
        settings.remote_url = "   ".to_string();
        assert_eq!(settings.status_line(), "No Lambda URL set");
        settings.remote_url = "https://example.com".to_string();
        assert_eq!(settings.status_line(), "Using Lambda at https://example.com");
    }

    #[test]
    fn test_open_settings_store_reads_saved_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        fs::write(&path, r#"{ "useMock": "false", "lambdaUrl": "https://example.com" }"#).unwrap();

        let (store, warning) = open_settings_store(Ok(path));
        assert!(warning.is_none());
        assert_eq!(store.settings().mode, ResponseMode::Remote);
        assert_eq!(store.settings().remote_url, "https://example.com");
    }

    #[test]
    fn test_corrupt_store_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        fs::write(&path, r#"{"useMock": "fal"#).unwrap();

        let (mut store, warning) = open_settings_store(Ok(path.clone()));
        assert_eq!(store.settings(), &Settings::default());
        assert!(warning.unwrap().contains("Failed to parse"));

        // Changes still work for the session and the bad file is left alone.
        store.set_mode(ResponseMode::Remote).unwrap();
        assert_eq!(store.settings().mode, ResponseMode::Remote);
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"useMock": "fal"#);
    }

    #[test]
    fn test_unknown_store_location_falls_back_to_defaults() {
        let (store, warning) =
            open_settings_store(Err(AssistantError::config_error("Could not determine data directory")));
        assert_eq!(store.settings(), &Settings::default());
        assert!(warning.unwrap().contains("data directory"));
    }
}
