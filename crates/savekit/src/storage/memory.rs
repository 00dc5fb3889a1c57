//! In-memory preference namespace for tests and local runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Result, SaveKitError};
use crate::storage::PreferenceStore;

/// In-memory implementation of PreferenceStore.
///
/// Clones share the same entries, so handing a clone to a fresh store
/// simulates a process restart against the same persisted namespace.
#[derive(Clone, Default)]
pub struct InMemoryPreferences {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryPreferences {
    /// Create a new empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of raw entries, bookkeeping keys included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SaveKitError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SaveKitError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SaveKitError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
