//! Registry-backed store over a flat preference namespace.

use std::sync::{Mutex, MutexGuard};

use crate::error::{Result, SaveKitError};
use crate::format::TextFormat;
use crate::storage::{PreferenceStore, StorageBackend, validate_key};

/// Reserved key holding the serialized key registry.
pub const REGISTRY_KEY: &str = "SaveKitKeyRegistry";

/// Store whose keys are enumerable through a side registry.
///
/// The underlying [`PreferenceStore`] cannot list its contents, so every key
/// ever saved is mirrored into an ordered registry persisted under
/// [`REGISTRY_KEY`]. The registry is written back immediately after each
/// change, which keeps enumeration correct across restarts. Registry
/// read-modify-write cycles run under one mutex; entry writes do not.
pub struct RegistryStore {
    prefs: Box<dyn PreferenceStore>,
    format: TextFormat,
    registry: Mutex<Vec<String>>,
}

impl RegistryStore {
    /// Wrap `prefs`, loading any registry it already holds.
    ///
    /// `format` encodes the registry itself, so it is obfuscated whenever the
    /// stored values are.
    pub fn new(prefs: Box<dyn PreferenceStore>, format: TextFormat) -> Self {
        let registry = load_registry(prefs.as_ref(), &format);
        tracing::debug!("Registry store opened with {} keys", registry.len());
        Self {
            prefs,
            format,
            registry: Mutex::new(registry),
        }
    }

    fn registry(&self) -> Result<MutexGuard<'_, Vec<String>>> {
        self.registry.lock().map_err(|_| SaveKitError::LockPoisoned)
    }

    fn persist_registry(&self, keys: &[String]) -> Result<()> {
        let stored = self.format.encode(keys)?;
        self.prefs.set(REGISTRY_KEY, &stored)?;
        self.prefs.flush()
    }
}

fn load_registry(prefs: &dyn PreferenceStore, format: &TextFormat) -> Vec<String> {
    let stored = match prefs.get(REGISTRY_KEY) {
        Ok(Some(stored)) if !stored.trim().is_empty() => stored,
        Ok(_) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read key registry: {}", e);
            return Vec::new();
        }
    };

    let keys: Vec<String> = match format.decode(&stored) {
        Ok(keys) => keys,
        Err(e) => {
            tracing::warn!("Failed to decode key registry: {}", e);
            return Vec::new();
        }
    };

    let mut registry: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        if key.trim().is_empty() || key == REGISTRY_KEY || registry.contains(&key) {
            continue;
        }
        registry.push(key);
    }
    registry
}

impl StorageBackend for RegistryStore {
    fn save_string(&self, key: &str, text: &str) -> Result<()> {
        validate_key(key)?;
        if key == REGISTRY_KEY {
            return Err(SaveKitError::ReservedKey(key.to_string()));
        }

        self.prefs.set(key, text)?;
        self.prefs.flush()?;
        tracing::debug!("Saved preference '{}'", key);

        let mut registry = self.registry()?;
        if !registry.iter().any(|k| k == key) {
            registry.push(key.to_string());
            self.persist_registry(&registry)?;
        }

        Ok(())
    }

    fn try_load_string(&self, key: &str) -> Result<Option<String>> {
        if key == REGISTRY_KEY {
            return Ok(None);
        }
        self.prefs.get(key)
    }

    fn exists(&self, key: &str) -> bool {
        key != REGISTRY_KEY && self.prefs.contains(key)
    }

    fn delete_string(&self, key: &str) -> Result<()> {
        if key == REGISTRY_KEY {
            return Err(SaveKitError::ReservedKey(key.to_string()));
        }

        if self.prefs.contains(key) {
            self.prefs.remove(key)?;
        }
        self.prefs.flush()?;

        let mut registry = self.registry()?;
        if let Some(index) = registry.iter().position(|k| k == key) {
            registry.remove(index);
            self.persist_registry(&registry)?;
        }

        tracing::debug!("Deleted preference '{}'", key);
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        let mut registry = self.registry()?;

        for key in registry.iter() {
            if self.prefs.contains(key) {
                self.prefs.remove(key)?;
            }
        }
        registry.clear();

        if self.prefs.contains(REGISTRY_KEY) {
            self.prefs.remove(REGISTRY_KEY)?;
        }
        self.prefs.flush()?;

        tracing::info!("Deleted all registered preferences");
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.registry()?.clone())
    }

    fn is_reserved(&self, key: &str) -> bool {
        key == REGISTRY_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryPreferences;

    fn store(prefs: &InMemoryPreferences) -> RegistryStore {
        RegistryStore::new(Box::new(prefs.clone()), TextFormat::plain(false))
    }

    #[test]
    fn test_registry_tracks_saves_and_deletes() {
        let prefs = InMemoryPreferences::new();
        let store = store(&prefs);

        store.save_string("k1", "1").unwrap();
        store.save_string("k2", "2").unwrap();
        store.save_string("k3", "3").unwrap();
        store.save_string("k1", "overwritten").unwrap();
        store.delete_string("k2").unwrap();

        assert_eq!(store.keys().unwrap(), ["k1", "k3"]);
        assert_eq!(store.try_load_string("k1").unwrap().as_deref(), Some("overwritten"));
    }

    #[test]
    fn test_registry_survives_restart() {
        let prefs = InMemoryPreferences::new();
        {
            let store = store(&prefs);
            store.save_string("k1", "1").unwrap();
            store.save_string("k2", "2").unwrap();
            store.save_string("k3", "3").unwrap();
            store.delete_string("k2").unwrap();
        }

        let reopened = store(&prefs);
        assert_eq!(reopened.keys().unwrap(), ["k1", "k3"]);
    }

    #[test]
    fn test_registry_key_is_hidden_and_protected() {
        let prefs = InMemoryPreferences::new();
        let store = store(&prefs);
        store.save_string("k1", "1").unwrap();

        assert!(prefs.contains(REGISTRY_KEY));
        assert!(!store.exists(REGISTRY_KEY));
        assert_eq!(store.try_load_string(REGISTRY_KEY).unwrap(), None);
        assert!(!store.keys().unwrap().iter().any(|k| k == REGISTRY_KEY));
        assert!(matches!(
            store.save_string(REGISTRY_KEY, "[]"),
            Err(SaveKitError::ReservedKey(_))
        ));
    }

    #[test]
    fn test_duplicates_and_self_reference_are_dropped_on_load() {
        let prefs = InMemoryPreferences::new();
        prefs
            .set(REGISTRY_KEY, r#"["a","a","SaveKitKeyRegistry"," ","b"]"#)
            .unwrap();

        assert_eq!(store(&prefs).keys().unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_corrupt_registry_starts_empty() {
        let prefs = InMemoryPreferences::new();
        prefs.set(REGISTRY_KEY, "{garbage").unwrap();

        assert!(store(&prefs).keys().unwrap().is_empty());
    }

    #[test]
    fn test_delete_all_clears_registry() {
        let prefs = InMemoryPreferences::new();
        let store = store(&prefs);
        store.save_string("a", "1").unwrap();
        store.save_string("b", "2").unwrap();

        store.delete_all().unwrap();

        assert!(store.keys().unwrap().is_empty());
        assert!(!prefs.contains("a"));
        assert!(!prefs.contains(REGISTRY_KEY));
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let store = store(&InMemoryPreferences::new());
        assert!(matches!(
            store.save_string("  ", "x"),
            Err(SaveKitError::InvalidKey { .. })
        ));
    }
}
