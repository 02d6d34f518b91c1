//! Durable key/value storage persisted as one JSON object on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use squadfeed_core::error::AppError;
use squadfeed_core::result::AppResult;
use squadfeed_core::traits::KeyValueStore;

/// File-backed storage. Every write rewrites the whole file.
#[derive(Debug)]
pub struct FileStorage {
    /// Backing file.
    path: PathBuf,
    /// In-memory mirror of the file.
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// an error so a credential is never silently discarded.
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::with_source(
                    squadfeed_core::error::ErrorKind::Storage,
                    format!("Corrupt storage file '{}'", path.display()),
                    e,
                )
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Storage file missing, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path).inspect_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to replace storage file");
        })?;
        Ok(())
    }

    /// Apply `f` to a copy of the entries and keep it only once it is on disk.
    fn update<R>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> R) -> AppResult<R> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = entries.clone();
        let result = f(&mut next);
        self.persist(&next)?;
        *entries = next;
        Ok(result)
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn delete(&self, key: &str) -> AppResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> AppResult<()> {
        self.update(BTreeMap::clear)
    }
}
