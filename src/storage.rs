use crate::errors::{AssistantError, AssistantResult};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::PathBuf,
};

/// Small string-to-string store that survives restarts.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> AssistantResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AssistantResult<()>;
}

/// Key-value store persisted as a single JSON object on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> AssistantResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                AssistantError::storage_error(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                ))
            })?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    AssistantError::storage_error(format!(
                        "Failed to parse {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };

        log::debug!("opened settings store at {}", path.display());
        Ok(Self { path, entries })
    }

    fn flush(&self) -> AssistantResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, body).map_err(|e| {
            AssistantError::storage_error(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AssistantResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AssistantResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AssistantResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AssistantResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
