//! Durable session storage.
//!
//! One fixed key, one slot, last writer wins. There is no locking and no
//! versioning: concurrent embeds (or browser tabs) racing on the same slot
//! overwrite each other by contract. Reads treat anything unreadable as an
//! absent value so a corrupt slot can never block initialization.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::error::Result;

/// Key-value storage persisting across embed instantiations.
///
/// Browser hosts back this with `localStorage`; webview or desktop
/// embedders can use [`FileStore`], tests [`MemoryStore`].
pub trait SessionStore {
    /// Reads the value under `key`. `None` when absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`, overwriting any prior value.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store. Durable only for the lifetime of the process; useful
/// as a test double and for hosts without real storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-backed store: a single JSON object mapping key to stored value.
///
/// Gives non-browser embedders the same durable semantics `localStorage`
/// gives the browser. The default location follows XDG conventions.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME/cactus/session.json`, falling back to
    /// `$HOME/.config/cactus/session.json`.
    pub fn default_path() -> PathBuf {
        let config_home = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        config_home.join("cactus").join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_entries(&self) -> Map<String, Value> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }
}

impl SessionStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        match self.load_entries().get(key) {
            Some(Value::String(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load_entries();
        entries.insert(key.to_owned(), Value::String(value.to_owned()));
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(entries))?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert_eq!(store.read("cactus-session"), None);

        store.write("cactus-session", "\"a\"").unwrap();
        store.write("cactus-session", "\"b\"").unwrap();
        assert_eq!(store.read("cactus-session").as_deref(), Some("\"b\""));
    }

    #[test]
    fn file_store_round_trips() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("session.json"));

        assert_eq!(store.read("cactus-session"), None);
        store.write("cactus-session", r#"{"token":"xyz"}"#).unwrap();
        assert_eq!(store.read("cactus-session").as_deref(), Some(r#"{"token":"xyz"}"#));
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("nested/dir/session.json"));

        store.write("cactus-session", "\"s\"").unwrap();
        assert_eq!(store.read("cactus-session").as_deref(), Some("\"s\""));
    }

    #[test]
    fn file_store_treats_corrupt_file_as_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.read("cactus-session"), None);

        // A write replaces the corrupt file instead of failing on it.
        store.write("cactus-session", "\"fresh\"").unwrap();
        assert_eq!(store.read("cactus-session").as_deref(), Some("\"fresh\""));
    }

    #[test]
    fn file_store_ignores_non_string_slots() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        fs::write(&path, r#"{"cactus-session": 42}"#).unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.read("cactus-session"), None);
    }

    #[test]
    fn default_path_honors_xdg_layout() {
        let path = FileStore::default_path();
        assert!(path.ends_with("cactus/session.json"));
    }
}
