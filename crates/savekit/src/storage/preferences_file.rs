//! Single-file preference namespace.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::{Result, SaveKitError};
use crate::storage::PreferenceStore;

/// File-backed implementation of PreferenceStore.
///
/// All entries live in one JSON object on disk. Writes land in memory and
/// reach the file on [`flush`](PreferenceStore::flush), which writes a
/// temp file and renames it over the original. A file that no longer parses
/// is moved to `{path}.corrupt` on open and the namespace starts empty.
pub struct FilePreferences {
    path: PathBuf,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl FilePreferences {
    /// Open the namespace stored at `path`, starting empty if the file is absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries: BTreeMap<String, String> = if path.exists() {
            let json = fs::read_to_string(&path)?;
            match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    set_aside(&path, &e)?;
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            "Opened preferences {} with {} entries",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            state: Mutex::new(State {
                entries,
                dirty: false,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn state(&self) -> Result<MutexGuard<'_, State>> {
        self.state.lock().map_err(|_| SaveKitError::LockPoisoned)
    }
}

/// Move an unparseable namespace file to `{path}.corrupt` so a fresh one can
/// take its place.
fn set_aside(path: &Path, cause: &serde_json::Error) -> Result<()> {
    let backup = path.with_extension("json.corrupt");
    tracing::warn!(
        "Preferences file {} is corrupted ({}). Moving it to {} and starting empty.",
        path.display(),
        cause,
        backup.display()
    );
    fs::rename(path, &backup).map_err(|e| {
        SaveKitError::CorruptedData(format!(
            "{}: {} (could not move aside: {})",
            path.display(),
            cause,
            e
        ))
    })
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.state()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.state()?;
        state.entries.insert(key.to_string(), value.to_string());
        state.dirty = true;
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.state()
            .map(|state| state.entries.contains_key(key))
            .unwrap_or(false)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut state = self.state()?;
        if state.entries.remove(key).is_some() {
            state.dirty = true;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut state = self.state()?;
        if !state.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&state.entries)?;
        let temp_path = self.path.with_extension("json.tmp");

        // Write to temp file
        fs::write(&temp_path, json)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path)?;

        state.dirty = false;
        tracing::debug!("Flushed preferences to {}", self.path.display());

        Ok(())
    }
}
