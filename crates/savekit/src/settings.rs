//! Serializer configuration structures and loaders.
//!
//! Settings come from an optional TOML file, may be overridden from the
//! environment, and fall back to documented defaults when no file exists.

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageOption {
    /// Flat preference namespace with a side registry of keys.
    #[default]
    RegistryStore,
    /// One `{key}.json` file per key inside a directory.
    DirectoryStore,
}

impl std::str::FromStr for StorageOption {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "registry" | "registry_store" | "prefs" => Ok(StorageOption::RegistryStore),
            "directory" | "directory_store" | "files" => Ok(StorageOption::DirectoryStore),
            _ => Err(SettingsError::UnknownStorage(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("encryption is enabled but the encryption key is empty")]
    EmptyEncryptionKey,

    #[error("unknown storage option {0:?}")]
    UnknownStorage(String),

    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything the serialization service needs to pick and drive a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerSettings {
    pub storage: StorageOption,
    /// Folder under `storage_root` used by the directory store.
    pub directory_name: String,
    pub use_encryption: bool,
    pub encryption_key: String,
    pub pretty_print: bool,
    /// Base directory for all on-disk state. Platform data dir when unset.
    pub storage_root: Option<PathBuf>,
    /// File under `storage_root` backing the registry store's namespace.
    pub preferences_file: String,
}

impl Default for SerializerSettings {
    fn default() -> Self {
        Self {
            storage: StorageOption::RegistryStore,
            directory_name: "SaveData".to_string(),
            use_encryption: false,
            encryption_key: "DefaultEncryptionKey".to_string(),
            pretty_print: true,
            storage_root: None,
            preferences_file: "preferences.json".to_string(),
        }
    }
}

impl SerializerSettings {
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load settings from a TOML file, using defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    "No usable serializer settings at {}: {}. Using default settings in memory.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_env_overrides();
        settings
    }

    /// Override fields from process environment variables.
    ///
    /// Environment variables:
    /// - `SAVEKIT_STORAGE` - `registry` or `directory`
    /// - `SAVEKIT_DIRECTORY` - Directory name for the directory store
    /// - `SAVEKIT_USE_ENCRYPTION` - Enable obfuscation (`true`/`false`)
    /// - `SAVEKIT_ENCRYPTION_KEY` - Obfuscation key
    /// - `SAVEKIT_PRETTY_PRINT` - Indent stored JSON (`true`/`false`)
    /// - `SAVEKIT_ROOT` - Base directory for on-disk state
    pub fn apply_env_overrides(&mut self) {
        if let Some(storage) = read_env::<StorageOption>("SAVEKIT_STORAGE") {
            self.storage = storage;
        }
        if let Ok(name) = env::var("SAVEKIT_DIRECTORY") {
            self.directory_name = name;
        }
        if let Some(enable) = read_env::<bool>("SAVEKIT_USE_ENCRYPTION") {
            self.use_encryption = enable;
        }
        if let Ok(key) = env::var("SAVEKIT_ENCRYPTION_KEY") {
            self.encryption_key = key;
        }
        if let Some(pretty) = read_env::<bool>("SAVEKIT_PRETTY_PRINT") {
            self.pretty_print = pretty;
        }
        if let Ok(root) = env::var("SAVEKIT_ROOT") {
            self.storage_root = Some(PathBuf::from(root));
        }
    }

    /// Reject configurations that can never work.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.use_encryption && self.encryption_key.is_empty() {
            return Err(SettingsError::EmptyEncryptionKey);
        }
        Ok(())
    }

    /// Base directory for on-disk state.
    ///
    /// Follows platform conventions when `storage_root` is unset:
    /// - macOS: `~/Library/Application Support/savekit`
    /// - Linux: `~/.local/share/savekit` (or `$XDG_DATA_HOME/savekit`)
    /// - Windows: `%APPDATA%\savekit`
    /// - Fallback: `./save_data`
    pub fn root_dir(&self) -> PathBuf {
        match &self.storage_root {
            Some(root) => root.clone(),
            None => directories::ProjectDirs::from("", "", "savekit")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("./save_data")),
        }
    }

    /// `{root}/{directory_name}`, the directory store's folder.
    pub fn save_directory(&self) -> PathBuf {
        self.root_dir().join(&self.directory_name)
    }

    /// `{root}/{preferences_file}`, the registry store's namespace file.
    pub fn preferences_path(&self) -> PathBuf {
        self.root_dir().join(&self.preferences_file)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
