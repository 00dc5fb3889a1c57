//! Serialization service facade.
//!
//! [`SerializationService`] is a cloneable handle that resolves its settings
//! and storage backend lazily on first use, exactly once, and then routes every
//! typed operation through the text pipeline and the backend.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Result, SaveKitError};
use crate::format::TextFormat;
use crate::settings::SerializerSettings;
use crate::storage::{Backend, PreferenceStore, StorageBackend};

/// Key under which every [`SerializationService::save`] records the UTC time.
pub const LAST_SAVE_TIME_KEY: &str = "LastSaveTime";

/// Where the service reads its settings from on first use.
#[derive(Debug, Clone)]
pub enum SettingsSource {
    /// Settings supplied by the caller, validated when the service is built.
    Inline(SerializerSettings),
    /// TOML file; missing or unparseable files fall back to defaults.
    File(PathBuf),
    /// Defaults with `SAVEKIT_*` environment overrides.
    Environment,
}

impl Default for SettingsSource {
    fn default() -> Self {
        SettingsSource::Inline(SerializerSettings::default())
    }
}

struct Resolved {
    settings: SerializerSettings,
    format: TextFormat,
    backend: Backend,
}

struct Inner {
    source: SettingsSource,
    /// Injected preference namespace, taken once by initialisation.
    preferences: Mutex<Option<Box<dyn PreferenceStore>>>,
    resolved: OnceLock<Resolved>,
}

/// Typed persistence facade over the configured backend.
///
/// Clones share one lazily-initialised backend. All methods are safe to call
/// from multiple threads; the first call initialises, concurrent first calls
/// wait for it.
#[derive(Clone)]
pub struct SerializationService {
    inner: Arc<Inner>,
}

/// Builder for [`SerializationService`].
#[derive(Default)]
pub struct SerializationServiceBuilder {
    source: SettingsSource,
    preferences: Option<Box<dyn PreferenceStore>>,
}

impl SerializationServiceBuilder {
    /// Use explicit settings.
    pub fn settings(mut self, settings: SerializerSettings) -> Self {
        self.source = SettingsSource::Inline(settings);
        self
    }

    /// Read settings from a TOML file on first use.
    pub fn settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = SettingsSource::File(path.into());
        self
    }

    /// Read settings from the environment on first use.
    pub fn from_env(mut self) -> Self {
        self.source = SettingsSource::Environment;
        self
    }

    /// Back the registry store with `preferences` instead of the
    /// configured preference file.
    pub fn preferences(mut self, preferences: impl PreferenceStore + 'static) -> Self {
        self.preferences = Some(Box::new(preferences));
        self
    }

    /// Build the handle. Inline settings are validated here; nothing touches
    /// storage until the first operation.
    pub fn build(self) -> Result<SerializationService> {
        if let SettingsSource::Inline(settings) = &self.source {
            settings.validate()?;
        }

        Ok(SerializationService {
            inner: Arc::new(Inner {
                source: self.source,
                preferences: Mutex::new(self.preferences),
                resolved: OnceLock::new(),
            }),
        })
    }
}

impl SerializationService {
    pub fn builder() -> SerializationServiceBuilder {
        SerializationServiceBuilder::default()
    }

    /// Service over explicit settings and the default preference file.
    pub fn new(settings: SerializerSettings) -> Result<Self> {
        Self::builder().settings(settings).build()
    }

    /// Force initialisation, surfacing any configuration or backend error.
    pub fn init(&self) -> Result<()> {
        self.resolved().map(|_| ())
    }

    /// Effective settings after resolution.
    pub fn settings(&self) -> Result<&SerializerSettings> {
        Ok(&self.resolved()?.settings)
    }

    /// The initialised backend, for raw text access.
    pub fn backend(&self) -> Result<&Backend> {
        Ok(&self.resolved()?.backend)
    }

    fn resolved(&self) -> Result<&Resolved> {
        if let Some(resolved) = self.inner.resolved.get() {
            return Ok(resolved);
        }

        let mut preferences = self
            .inner
            .preferences
            .lock()
            .map_err(|_| SaveKitError::LockPoisoned)?;

        if let Some(resolved) = self.inner.resolved.get() {
            return Ok(resolved);
        }

        let settings = match &self.inner.source {
            SettingsSource::Inline(settings) => settings.clone(),
            SettingsSource::File(path) => SerializerSettings::load_or_default(path),
            SettingsSource::Environment => SerializerSettings::from_env(),
        };
        let format = TextFormat::from_settings(&settings)?;
        let backend = Backend::from_settings(&settings, format.clone(), preferences.take())?;

        tracing::info!(
            "Serialization service initialised: storage={:?}, obfuscated={}",
            backend.kind(),
            format.is_obfuscated()
        );

        let resolved = Resolved {
            settings,
            format,
            backend,
        };
        Ok(self.inner.resolved.get_or_init(|| resolved))
    }

    /// Serialize `value` under `key` and refresh [`LAST_SAVE_TIME_KEY`].
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.save_without_updating_timestamp(key, value)?;
        self.save_without_updating_timestamp(LAST_SAVE_TIME_KEY, &Utc::now())
    }

    /// Serialize `value` under `key` leaving the last-save marker untouched.
    pub fn save_without_updating_timestamp<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<()> {
        let resolved = self.resolved()?;
        let text = resolved.format.encode(value)?;
        resolved.backend.save_string(key, &text)
    }

    /// Load the value stored under `key`.
    ///
    /// `Ok(None)` when nothing is stored; decode failures are errors.
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let resolved = self.resolved()?;
        match resolved.backend.try_load_string(key)? {
            Some(text) => resolved.format.decode(&text).map(Some),
            None => Ok(None),
        }
    }

    /// Best-effort load: any failure yields `default`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!("Failed to load '{}', using default: {}", key, e);
                default
            }
        }
    }

    pub fn exists(&self, key: &str) -> bool {
        match self.resolved() {
            Ok(resolved) => resolved.backend.exists(key),
            Err(e) => {
                tracing::error!("Serialization service unavailable: {}", e);
                false
            }
        }
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        self.resolved()?.backend.delete_string(key)
    }

    pub fn delete_all(&self) -> Result<()> {
        self.resolved()?.backend.delete_all()
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        self.resolved()?.backend.keys()
    }

    /// Bundle the stored text of `keys` into one blob.
    ///
    /// Entries are copied as stored, without decoding. Keys that are
    /// reserved, absent or unreadable are skipped with a warning.
    pub fn pack<I, K>(&self, keys: I) -> Result<String>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let resolved = self.resolved()?;
        let mut bundle = Map::new();

        for key in keys {
            let key = key.as_ref();
            if resolved.backend.is_reserved(key) {
                tracing::warn!("Skipping reserved key '{}' while packing", key);
                continue;
            }
            match resolved.backend.try_load_string(key) {
                Ok(Some(text)) => {
                    bundle.insert(key.to_string(), Value::String(text));
                }
                Ok(None) => tracing::warn!("Skipping missing key '{}' while packing", key),
                Err(e) => tracing::warn!("Skipping key '{}' while packing: {}", key, e),
            }
        }

        tracing::debug!("Packed {} entries", bundle.len());
        resolved.format.encode(&bundle)
    }

    /// Bundle every enumerable key.
    pub fn pack_all(&self) -> Result<String> {
        let keys = self.keys()?;
        self.pack(&keys)
    }

    /// Restore a blob produced by [`pack`](Self::pack).
    ///
    /// Returns the number of entries written. A blob that does not decode to
    /// a key/text map is ignored with a warning. With `overwrite` false,
    /// keys that already exist are left alone.
    pub fn unpack(&self, blob: &str, overwrite: bool) -> Result<usize> {
        let resolved = self.resolved()?;

        if blob.trim().is_empty() {
            tracing::warn!("Ignoring empty bundle");
            return Ok(0);
        }

        let bundle: Map<String, Value> = match resolved.format.decode(blob) {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::warn!("Ignoring malformed bundle: {}", e);
                return Ok(0);
            }
        };

        let mut written = 0;
        for (key, value) in bundle {
            let Value::String(text) = value else {
                tracing::warn!("Skipping bundle entry '{}': not stored text", key);
                continue;
            };
            if resolved.backend.is_reserved(&key) {
                tracing::warn!("Skipping reserved key '{}' while unpacking", key);
                continue;
            }
            if !overwrite && resolved.backend.exists(&key) {
                tracing::debug!("Keeping existing '{}'", key);
                continue;
            }

            resolved.backend.save_string(&key, &text)?;
            written += 1;
        }

        tracing::debug!("Unpacked {} entries", written);
        Ok(written)
    }

    /// Time of the most recent [`save`](Self::save), if any.
    pub fn last_save_time_utc(&self) -> Option<DateTime<Utc>> {
        self.load(LAST_SAVE_TIME_KEY, None)
    }

    pub fn last_save_time_local(&self) -> Option<DateTime<Local>> {
        self.last_save_time_utc()
            .map(|time| time.with_timezone(&Local))
    }

    /// [`save`](Self::save) on the blocking thread pool.
    pub async fn save_async<T>(&self, key: impl Into<String>, value: T) -> Result<()>
    where
        T: Serialize + Send + 'static,
    {
        let service = self.clone();
        let key = key.into();
        tokio::task::spawn_blocking(move || service.save(&key, &value))
            .await
            .map_err(SaveKitError::WorkerJoin)?
    }

    /// [`load`](Self::load) on the blocking thread pool.
    pub async fn load_async<T>(&self, key: impl Into<String>, default: T) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let service = self.clone();
        let key = key.into();
        tokio::task::spawn_blocking(move || service.load(&key, default))
            .await
            .map_err(SaveKitError::WorkerJoin)
    }
}
