//! Key/value persistence.
//!
//! The core never touches a concrete storage backend. Everything that needs
//! to survive a restart goes through [`KeyValueStore`], which mirrors the
//! browser's local storage: string keys, string values, whole-value writes.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Minimal string key/value store.
pub trait KeyValueStore {
    /// Read a value, `None` if the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing anything stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Error when a write could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError {
    pub key: String,
    pub reason: String,
}

impl StorageError {
    pub fn new(key: &str, reason: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to write '{}': {}", self.key, self.reason)
    }
}

impl std::error::Error for StorageError {}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a single entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// The whole file is rewritten on every `set`. A missing file is an empty
/// store; an unreadable or malformed one is also opened empty, with the reason
/// logged and kept in [`JsonFileStore::open_warning`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
    warning: Option<String>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading whatever it currently holds.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let (values, warning) = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => (values, None),
                Err(err) => (HashMap::new(), Some(format!("not a JSON object: {}", err))),
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => (HashMap::new(), None),
            Err(err) => (HashMap::new(), Some(format!("unreadable: {}", err))),
        };
        if let Some(reason) = &warning {
            warn!(path = %path.display(), %reason, "store file ignored, starting empty");
        }
        debug!(path = %path.display(), keys = values.len(), "opened json file store");
        Self {
            path,
            values,
            warning,
        }
    }

    /// Why an existing file was ignored on open, if it was.
    pub fn open_warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), value.to_string());

        let contents =
            serde_json::to_string_pretty(&next).map_err(|e| StorageError::new(key, e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| StorageError::new(key, e.to_string()))?;

        self.values = next;
        Ok(())
    }
}
