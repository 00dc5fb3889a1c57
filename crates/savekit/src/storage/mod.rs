//! Storage layer for serialized text.
//!
//! Backends persist opaque strings under string keys:
//! - [`RegistryStore`] over a flat [`PreferenceStore`] plus a key registry
//! - [`DirectoryStore`] with one file per key
//!
//! [`Backend`] is the closed set the service selects between at startup.

mod directory;
mod memory;
mod preferences_file;
mod registry;
mod traits;

pub use directory::{DirectoryStore, FILE_EXTENSION};
pub use memory::InMemoryPreferences;
pub use preferences_file::FilePreferences;
pub use registry::{REGISTRY_KEY, RegistryStore};
pub use traits::{PreferenceStore, StorageBackend};

use crate::error::{Result, SaveKitError};
use crate::format::TextFormat;
use crate::settings::{SerializerSettings, StorageOption};

/// Reject keys no backend can store.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(SaveKitError::invalid_key(key, "key is empty"));
    }
    Ok(())
}

/// The backend chosen from [`SerializerSettings::storage`].
pub enum Backend {
    Registry(RegistryStore),
    Directory(DirectoryStore),
}

impl Backend {
    /// Construct the configured backend.
    ///
    /// The registry store uses `preferences` when given, otherwise the
    /// preference file at [`SerializerSettings::preferences_path`].
    pub fn from_settings(
        settings: &SerializerSettings,
        format: TextFormat,
        preferences: Option<Box<dyn PreferenceStore>>,
    ) -> Result<Self> {
        match settings.storage {
            StorageOption::RegistryStore => {
                let prefs = match preferences {
                    Some(prefs) => prefs,
                    None => Box::new(FilePreferences::open(settings.preferences_path())?),
                };
                Ok(Backend::Registry(RegistryStore::new(prefs, format)))
            }
            StorageOption::DirectoryStore => Ok(Backend::Directory(DirectoryStore::new(
                settings.save_directory(),
            ))),
        }
    }

    pub fn kind(&self) -> StorageOption {
        match self {
            Backend::Registry(_) => StorageOption::RegistryStore,
            Backend::Directory(_) => StorageOption::DirectoryStore,
        }
    }

    fn inner(&self) -> &dyn StorageBackend {
        match self {
            Backend::Registry(store) => store,
            Backend::Directory(store) => store,
        }
    }
}

impl StorageBackend for Backend {
    fn save_string(&self, key: &str, text: &str) -> Result<()> {
        self.inner().save_string(key, text)
    }

    fn try_load_string(&self, key: &str) -> Result<Option<String>> {
        self.inner().try_load_string(key)
    }

    fn exists(&self, key: &str) -> bool {
        self.inner().exists(key)
    }

    fn delete_string(&self, key: &str) -> Result<()> {
        self.inner().delete_string(key)
    }

    fn delete_all(&self) -> Result<()> {
        self.inner().delete_all()
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.inner().keys()
    }

    fn is_reserved(&self, key: &str) -> bool {
        self.inner().is_reserved(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backend_follows_settings() {
        let temp_dir = TempDir::new().unwrap();
        let settings = SerializerSettings {
            storage: StorageOption::DirectoryStore,
            storage_root: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };

        let backend = Backend::from_settings(&settings, TextFormat::plain(true), None).unwrap();
        assert_eq!(backend.kind(), StorageOption::DirectoryStore);

        backend.save_string("slot", "1").unwrap();
        assert!(temp_dir.path().join("SaveData").join("slot.json").is_file());
    }

    #[test]
    fn test_registry_backend_uses_preference_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings = SerializerSettings {
            storage_root: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };

        let backend = Backend::from_settings(&settings, TextFormat::plain(true), None).unwrap();
        assert_eq!(backend.kind(), StorageOption::RegistryStore);
        assert!(backend.is_reserved(REGISTRY_KEY));

        backend.save_string("slot", "1").unwrap();
        assert!(settings.preferences_path().is_file());
    }
}
