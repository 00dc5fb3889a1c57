//! One-file-per-key directory store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, SaveKitError};
use crate::storage::{StorageBackend, validate_key};

/// Extension of every entry file.
pub const FILE_EXTENSION: &str = "json";

/// Directory-based implementation of StorageBackend.
///
/// # File Format
///
/// Each key is stored as `{dir}/{key}.json`, UTF-8 text. The directory is
/// created on the first save. Keys are enumerated from the directory listing,
/// so no registry is needed.
///
/// Keys must name a single file: path separators, NUL, `.` and `..` are
/// rejected so an entry can never land outside `dir`.
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `dir`. Nothing is touched on disk yet.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the path to an entry file.
    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_file_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, FILE_EXTENSION)))
    }
}

fn validate_file_key(key: &str) -> Result<()> {
    validate_key(key)?;
    if key.contains(['/', '\\', '\0']) {
        return Err(SaveKitError::invalid_key(key, "contains a path separator"));
    }
    if key == "." || key == ".." {
        return Err(SaveKitError::invalid_key(key, "names a directory"));
    }
    Ok(())
}

impl StorageBackend for DirectoryStore {
    fn save_string(&self, key: &str, text: &str) -> Result<()> {
        let path = self.entry_path(key)?;

        fs::create_dir_all(&self.dir)?;

        // Write to a temp file unique to this call
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(text.as_bytes())?;

        // Atomic rename
        temp.persist(&path).map_err(|e| e.error)?;

        tracing::debug!("Saved '{}' to {}", key, path.display());

        Ok(())
    }

    fn try_load_string(&self, key: &str) -> Result<Option<String>> {
        let Ok(path) = self.entry_path(key) else {
            return Ok(None);
        };

        match fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!("Loaded '{}' from {}", key, path.display());
                Ok(Some(text))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, key: &str) -> bool {
        self.entry_path(key).map(|path| path.is_file()).unwrap_or(false)
    }

    fn delete_string(&self, key: &str) -> Result<()> {
        let Ok(path) = self.entry_path(key) else {
            return Ok(());
        };

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted {}", path.display());
        }

        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        let keys = self.keys()?;
        for key in &keys {
            self.delete_string(key)?;
        }

        tracing::info!("Deleted {} entries from {}", keys.len(), self.dir.display());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let suffix = format!(".{}", FILE_EXTENSION);
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file()
                && let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(key) = filename.strip_suffix(&suffix)
                && !key.is_empty()
            {
                keys.push(key.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }
}
