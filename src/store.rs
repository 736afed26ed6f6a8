// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable key-value persistence for the ledger and settings.
//!
//! Every value is a JSON document stored under a versioned key. Reads are
//! lenient: a missing, unparsable, or wrongly shaped value loads as empty.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::PersistenceError;
use crate::models::{Settings, Transaction};

pub const TRANSACTIONS_KEY: &str = "et_transactions_v1";
pub const SETTINGS_KEY: &str = "et_settings_v1";

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pennywise", "pennywise"));

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Handle shared by the ledger and the settings owner.
pub type SharedStore = Rc<dyn KeyValueStore>;

/// In-memory store. Clones share the same map, so a test can keep a handle
/// and inspect what the ledger wrote.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Makes every subsequent write fail, as a full or revoked storage would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn shared(&self) -> SharedStore {
        Rc::new(self.clone())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.fail_writes.get() {
            return Err(PersistenceError::Unavailable);
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        if self.fail_writes.get() {
            return Err(PersistenceError::Unavailable);
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        // Atomic replace.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

/// Opens the file store at `dir`, or at the platform data dir when absent.
pub fn open_file_store(dir: Option<PathBuf>) -> Result<SharedStore> {
    let root = match dir {
        Some(d) => d,
        None => data_dir()?,
    };
    let store = FileStore::open(&root)
        .with_context(|| format!("Open data dir at {}", root.display()))?;
    tracing::debug!(root = %store.root().display(), "opened file store");
    Ok(Rc::new(store))
}

/// Decodes a JSON array of transactions, dropping entries that fail the
/// shape check. Returns `None` when `value` is not an array.
pub fn decode_transactions(value: &Value) -> Option<Vec<Transaction>> {
    let items = value.as_array()?;
    let decoded: Vec<Transaction> = items.iter().filter_map(Transaction::from_json).collect();
    let dropped = items.len() - decoded.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped malformed transaction entries");
    }
    Some(decoded)
}

pub fn load_transactions(store: &dyn KeyValueStore) -> Vec<Transaction> {
    let raw = match store.get(TRANSACTIONS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(error = %err, "could not read transactions; starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => decode_transactions(&value).unwrap_or_default(),
        Err(err) => {
            tracing::warn!(error = %err, "stored transactions are not valid JSON; starting empty");
            Vec::new()
        }
    }
}

pub fn save_transactions(
    store: &dyn KeyValueStore,
    transactions: &[Transaction],
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(transactions)?;
    store.set(TRANSACTIONS_KEY, &json)
}

pub fn load_settings(store: &dyn KeyValueStore) -> Settings {
    match store.get(SETTINGS_KEY) {
        Ok(Some(raw)) => serde_json::from_str::<Settings>(&raw)
            .map(Settings::normalized)
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "stored settings are unreadable; using defaults");
                Settings::default()
            }),
        Ok(None) => Settings::default(),
        Err(err) => {
            tracing::warn!(error = %err, "could not read settings; using defaults");
            Settings::default()
        }
    }
}

pub fn save_settings(store: &dyn KeyValueStore, settings: &Settings) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(settings)?;
    store.set(SETTINGS_KEY, &json)
}
