//! Storage contracts shared by every backend.

use crate::error::Result;

/// Key/value store for already-serialized text.
///
/// Every backend keeps at most one entry per key; saving overwrites.
pub trait StorageBackend: Send + Sync {
    /// Persist `text` under `key`, replacing any previous entry.
    fn save_string(&self, key: &str, text: &str) -> Result<()>;

    /// Load the raw text stored under `key`.
    ///
    /// Returns `Ok(None)` when no entry exists.
    fn try_load_string(&self, key: &str) -> Result<Option<String>>;

    /// Check if an entry exists.
    fn exists(&self, key: &str) -> bool;

    /// Remove an entry. Removing an absent key is not an error.
    fn delete_string(&self, key: &str) -> Result<()>;

    /// Remove every entry this backend knows about.
    fn delete_all(&self) -> Result<()>;

    /// Every user-visible key, in a stable order.
    fn keys(&self) -> Result<Vec<String>>;

    /// Keys the backend uses for its own bookkeeping.
    ///
    /// Reserved keys never appear in [`keys`](Self::keys) and are excluded
    /// from bulk pack/unpack.
    fn is_reserved(&self, _key: &str) -> bool {
        false
    }
}

/// Flat preference namespace that cannot enumerate its own keys.
///
/// This is the primitive underneath [`RegistryStore`](super::RegistryStore):
/// a host preference API, a single file, or plain memory.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn contains(&self, key: &str) -> bool;

    fn remove(&self, key: &str) -> Result<()>;

    /// Make previous writes durable.
    fn flush(&self) -> Result<()>;
}
