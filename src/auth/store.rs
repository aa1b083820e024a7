//! Persisted session storage
//!
//! A session lives in a flat key -> string area, the same layout a browser's
//! local storage would hold. The gate only ever sees it through the
//! [`SessionStore`] trait.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Session active flag, compared as the exact string `"true"`
pub const KEY_AUTHENTICATED: &str = "isAuthenticated";
/// Role label
pub const KEY_ROLE: &str = "userRole";
/// Display/audit identifier
pub const KEY_EMAIL: &str = "userEmail";
/// RFC 3339 login timestamp, informational only
pub const KEY_LOGIN_TIME: &str = "loginTime";

/// Every key the session occupies
pub const SESSION_KEYS: [&str; 4] = [KEY_AUTHENTICATED, KEY_ROLE, KEY_EMAIL, KEY_LOGIN_TIME];

/// Flat string key-value area
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store, one per client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Store backed by a JSON object on disk.
///
/// Changes stay in memory until [`FileStore::save`] is called.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open the store at `path`. A missing file opens empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let inner = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                MemoryStore::new()
            } else {
                let entries: BTreeMap<String, String> = serde_json::from_str(&content)
                    .map_err(|e| {
                        Error::Config(format!("Corrupt session file {}: {}", path.display(), e))
                    })?;
                MemoryStore { entries }
            }
        } else {
            MemoryStore::new()
        };

        Ok(Self { path, inner })
    }

    /// Open the store at `path`, starting empty when the file can't be read.
    /// Saving the empty store then removes the unreadable file.
    pub fn open_or_reset(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(path.clone()) {
            Ok(store) => store,
            Err(e) => {
                warn!("Discarding session file: {}", e);
                Self {
                    path,
                    inner: MemoryStore::new(),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current contents to disk, creating parent directories.
    /// An empty store removes the file.
    pub fn save(&self) -> Result<()> {
        if self.inner.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self.inner.entries())?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.inner.set(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.inner.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.get(KEY_ROLE).is_none());

        store.set(KEY_ROLE, "driver");
        assert_eq!(store.get(KEY_ROLE).as_deref(), Some("driver"));

        store.set(KEY_ROLE, "admin");
        assert_eq!(store.get(KEY_ROLE).as_deref(), Some("admin"));
        assert_eq!(store.len(), 1);

        store.remove(KEY_ROLE);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut store = MemoryStore::new();
        store.remove(KEY_EMAIL);
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("session.json")).unwrap();
        assert!(store.get(KEY_AUTHENTICATED).is_none());
    }
}
