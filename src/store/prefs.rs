//! Named preference store
//!
//! A small key-value store persisted as a single JSON object on disk.
//! Values are one of four kinds: text, flag, long, or a set of texts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// A single stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Flag(bool),
    Long(i64),
    Text(String),
    TextSet(BTreeSet<String>),
}

/// Errors raised while committing the store to disk
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key-value preference store backed by `<dir>/<name>.json`
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: PathBuf,
    entries: BTreeMap<String, PrefValue>,
}

impl PrefStore {
    /// Open a named store in `dir`.
    ///
    /// A missing file yields an empty store. So does an unreadable or
    /// unparseable one, after logging a warning. Keys holding a value of
    /// an unknown kind are dropped one by one.
    pub fn open(dir: &Path, name: &str) -> Self {
        let path = dir.join(format!("{}.json", name));
        let entries = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(data) => match serde_json::from_str::<BTreeMap<String, Value>>(&data) {
                    Ok(raw) => {
                        log::info!("Preferences loaded from {:?}", path);
                        decode_entries(raw)
                    }
                    Err(e) => {
                        log::warn!("Failed to parse preferences: {}, starting empty", e);
                        BTreeMap::new()
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read preferences: {}, starting empty", e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Self { path, entries }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Text stored under `key`, if the key holds text
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some(PrefValue::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_string())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.entries.get(key) {
            Some(PrefValue::Flag(b)) => *b,
            _ => default,
        }
    }

    pub fn get_long(&self, key: &str, default: i64) -> i64 {
        match self.entries.get(key) {
            Some(PrefValue::Long(n)) => *n,
            _ => default,
        }
    }

    pub fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        match self.entries.get(key) {
            Some(PrefValue::TextSet(set)) => Some(set.clone()),
            _ => None,
        }
    }

    /// Start a batch of changes; nothing is written until `apply`
    pub fn edit(&mut self) -> PrefEditor<'_> {
        PrefEditor {
            store: self,
            pending: Vec::new(),
        }
    }

    /// Write the whole store atomically (temp file, then rename)
    fn commit(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(io_err)?;

        let json = serde_json::to_string_pretty(&self.entries)?;
        let mut temp = NamedTempFile::new_in(parent).map_err(io_err)?;
        temp.write_all(json.as_bytes()).map_err(io_err)?;
        temp.persist(&self.path).map_err(|e| io_err(e.error))?;

        log::debug!("Preferences saved to {:?}", self.path);
        Ok(())
    }
}

/// Keep every entry of a known kind; a foreign value only loses its own key
fn decode_entries(raw: BTreeMap<String, Value>) -> BTreeMap<String, PrefValue> {
    raw.into_iter()
        .filter_map(|(key, value)| match PrefValue::deserialize(value) {
            Ok(value) => Some((key, value)),
            Err(e) => {
                log::warn!("Dropping preference {:?}: {}", key, e);
                None
            }
        })
        .collect()
}

enum Change {
    Put(String, PrefValue),
    Remove(String),
}

/// Batched set of changes against a [`PrefStore`]
pub struct PrefEditor<'a> {
    store: &'a mut PrefStore,
    pending: Vec<Change>,
}

impl<'a> PrefEditor<'a> {
    pub fn put_string(mut self, key: &str, value: impl Into<String>) -> Self {
        self.pending.push(Change::Put(key.to_string(), PrefValue::Text(value.into())));
        self
    }

    pub fn put_bool(mut self, key: &str, value: bool) -> Self {
        self.pending.push(Change::Put(key.to_string(), PrefValue::Flag(value)));
        self
    }

    pub fn put_long(mut self, key: &str, value: i64) -> Self {
        self.pending.push(Change::Put(key.to_string(), PrefValue::Long(value)));
        self
    }

    pub fn put_string_set<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = values.into_iter().map(Into::into).collect();
        self.pending.push(Change::Put(key.to_string(), PrefValue::TextSet(set)));
        self
    }

    pub fn remove(mut self, key: &str) -> Self {
        self.pending.push(Change::Remove(key.to_string()));
        self
    }

    /// Apply pending changes in memory, then persist the store
    pub fn apply(self) -> Result<(), StoreError> {
        for change in self.pending {
            match change {
                Change::Put(key, value) => {
                    self.store.entries.insert(key, value);
                }
                Change::Remove(key) => {
                    self.store.entries.remove(&key);
                }
            }
        }
        self.store.commit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = PrefStore::open(dir.path(), "prefs");
        assert!(!store.contains("theme"));
        assert_eq!(store.get_string_or("theme", "system"), "system");
        assert_eq!(store.get_long("lastUsage", 0), 0);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let mut store = PrefStore::open(dir.path(), "prefs");
        store
            .edit()
            .put_string("theme", "dark")
            .put_bool("customIsDark", true)
            .put_long("lastUsage", 1_700_000_000_000)
            .put_string_set("favorites", ["Read a book", "Go for a walk"])
            .apply()
            .unwrap();

        let reopened = PrefStore::open(dir.path(), "prefs");
        assert_eq!(reopened.get_string("theme").as_deref(), Some("dark"));
        assert!(reopened.get_bool("customIsDark", false));
        assert_eq!(reopened.get_long("lastUsage", 0), 1_700_000_000_000);
        let favorites = reopened.get_string_set("favorites").unwrap();
        assert!(favorites.contains("Read a book"));
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn test_wrong_kind_returns_default() {
        let dir = tempdir().unwrap();
        let mut store = PrefStore::open(dir.path(), "prefs");
        store.edit().put_string("customIsDark", "yes").apply().unwrap();
        assert!(!store.get_bool("customIsDark", false));
        assert_eq!(store.get_long("customIsDark", 7), 7);
    }

    #[test]
    fn test_remove_key() {
        let dir = tempdir().unwrap();
        let mut store = PrefStore::open(dir.path(), "prefs");
        store.edit().put_string("theme", "light").apply().unwrap();
        store.edit().remove("theme").apply().unwrap();
        assert!(!PrefStore::open(dir.path(), "prefs").contains("theme"));
    }

    #[test]
    fn test_foreign_value_only_drops_its_key() {
        let dir = tempdir().unwrap();
        let json = concat!(
            r#"{"suggestions":"{\"suggestions\":[\"Knit\"]}","theme":"dark","#,
            r#""lastUsage":1.5,"extra":null,"nested":{"a":1}}"#,
        );
        fs::write(dir.path().join("prefs.json"), json).unwrap();

        let store = PrefStore::open(dir.path(), "prefs");
        assert_eq!(
            store.get_string("suggestions").as_deref(),
            Some(r#"{"suggestions":["Knit"]}"#)
        );
        assert_eq!(store.get_string_or("theme", "system"), "dark");
        assert!(!store.contains("lastUsage"));
        assert!(!store.contains("extra"));
        assert!(!store.contains("nested"));
        assert_eq!(store.get_long("lastUsage", 0), 0);
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("prefs.json"), "{ not json").unwrap();
        let store = PrefStore::open(dir.path(), "prefs");
        assert!(!store.contains("theme"));
    }
}
