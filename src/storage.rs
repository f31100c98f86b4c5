//! Local key-value persistence for in-progress form input
//!
//! The form controller writes a snapshot of the form after every edit so
//! a half-filled request survives a restart. The store is injected as a
//! trait so the controller is testable without a real data directory.

use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Key under which the in-progress form snapshot is stored
pub const FORM_DATA_KEY: &str = "demo-formData";

/// Minimal key-value storage capability
#[cfg_attr(test, mockall::automock)]
pub trait FormStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`; removing a missing key is fine
    fn delete(&self, key: &str) -> Result<()>;
}

/// File-backed store keeping one JSON file per key in the platform data dir
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the platform data directory
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("io", "demoreq", "demo-request-tui")
            .ok_or_else(|| anyhow::anyhow!("could not resolve a platform data directory"))?;
        Ok(Self {
            dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Create a store rooted at an explicit directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl FormStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_get_missing_key_returns_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::with_dir(dir.path().to_path_buf());
        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileStore::with_dir(dir.path().to_path_buf());
        store.set(FORM_DATA_KEY, r#"{"firstName":"Jane"}"#).unwrap();
        assert_eq!(
            store.get(FORM_DATA_KEY).unwrap(),
            Some(r#"{"firstName":"Jane"}"#.to_string())
        );
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let store = FileStore::with_dir(dir.path().to_path_buf());
        store.set(FORM_DATA_KEY, "first").unwrap();
        store.set(FORM_DATA_KEY, "second").unwrap();
        assert_eq!(store.get(FORM_DATA_KEY).unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_delete_removes_value() {
        let dir = tempdir().unwrap();
        let store = FileStore::with_dir(dir.path().to_path_buf());
        store.set(FORM_DATA_KEY, "value").unwrap();
        store.delete(FORM_DATA_KEY).unwrap();
        assert_eq!(store.get(FORM_DATA_KEY).unwrap(), None);
    }

    #[test]
    fn test_delete_missing_key_is_noop() {
        let dir = tempdir().unwrap();
        let store = FileStore::with_dir(dir.path().to_path_buf());
        assert!(store.delete("absent").is_ok());
    }

    #[test]
    fn test_set_creates_store_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("deeper").join("still");
        let store = FileStore::with_dir(nested);
        store.set(FORM_DATA_KEY, "value").unwrap();
        assert_eq!(store.get(FORM_DATA_KEY).unwrap(), Some("value".to_string()));
    }
}
