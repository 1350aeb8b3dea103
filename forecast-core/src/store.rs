//! Durable key/value storage for small string preferences.
//!
//! The screen only ever keeps one value here: the name of the last city the
//! user selected, under [`CITY_KEY`].

use anyhow::{Context, Result};
use std::{
    collections::BTreeMap,
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use crate::config::project_dirs;

pub const CITY_KEY: &str = "city";

pub trait PreferenceStore: Send + Sync + Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values_mut().insert(key.to_string(), value.to_string());
        store
    }

    fn values_mut(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values_mut().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat TOML table of strings on disk.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Store under the platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(project_dirs()?.data_dir().join("preferences.toml")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences: {}", self.path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse preferences: {}", self.path.display()))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        match self.read_all() {
            Ok(mut values) => values.remove(key),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable preferences file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let text = toml::to_string(&values).context("Failed to serialize preferences")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))
    }
}
