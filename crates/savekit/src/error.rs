//! Unified error types surfaced by the persistence layer.
//!
//! Wraps failures from codecs, obfuscation, settings, and storage backends so
//! callers can bubble them up with consistent context.

use thiserror::Error;

pub use crate::geometry::CodecError;
pub use crate::obfuscation::ObfuscationError;
pub use crate::settings::SettingsError;

pub type Result<T> = std::result::Result<T, SaveKitError>;

#[derive(Debug, Error)]
pub enum SaveKitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Obfuscation(#[from] ObfuscationError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("key {0:?} is reserved by the storage backend")]
    ReservedKey(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("storage lock was poisoned")]
    LockPoisoned,

    #[error("background worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl From<serde_json::Error> for SaveKitError {
    fn from(err: serde_json::Error) -> Self {
        SaveKitError::Json(err.to_string())
    }
}

impl SaveKitError {
    pub(crate) fn invalid_key(key: &str, reason: &'static str) -> Self {
        SaveKitError::InvalidKey {
            key: key.to_string(),
            reason,
        }
    }
}
