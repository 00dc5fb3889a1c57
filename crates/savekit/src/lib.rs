//! Key-indexed persistence for application state.
//!
//! Values are turned into a JSON text tree, optionally obfuscated, and stored
//! under string keys in one of two local backends. Consumers hold a
//! [`SerializationService`] and use its typed save/load/pack API.
//!
//! Modules are organized by responsibility:
//! - [`geometry`] provides the fixed-shape codecs for vectors, rotations,
//!   colors, bounds and transforms
//! - [`serializer`] and [`shared`] turn arbitrary serde values into text trees
//! - [`obfuscation`] and [`format`] produce the exact text handed to storage
//! - [`storage`] hosts the registry-backed and directory backends
//! - [`service`] is the facade, configured through [`settings`]
pub mod error;
pub mod format;
pub mod geometry;
pub mod obfuscation;
pub mod serializer;
pub mod service;
pub mod settings;
pub mod shared;
pub mod storage;

pub use error::{CodecError, ObfuscationError, Result, SaveKitError, SettingsError};
pub use format::TextFormat;
pub use geometry::{
    Bounds, Color, GeometricCodec, Quaternion, Rect, Transform, TransformData, TransformTarget,
    Vector2, Vector2Int, Vector3, Vector3Int, Vector4,
};
pub use obfuscation::{Obfuscator, deobfuscate, obfuscate};
pub use serializer::{SerializerOptions, ValueSerializer};
pub use service::{
    LAST_SAVE_TIME_KEY, SerializationService, SerializationServiceBuilder, SettingsSource,
};
pub use settings::{SerializerSettings, StorageOption};
pub use shared::Shared;
pub use storage::{
    Backend, DirectoryStore, FilePreferences, InMemoryPreferences, PreferenceStore,
    REGISTRY_KEY, RegistryStore, StorageBackend,
};
