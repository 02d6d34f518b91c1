//! Key/value storage trait for durable and session-scoped backends.

use crate::result::AppResult;

/// Trait for string key/value stores (durable or session-scoped).
///
/// Values are plain strings; structured values are stored as JSON. Reads
/// and writes are synchronous, matching web-storage semantics.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a key exists.
    fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Remove every entry.
    fn clear(&self) -> AppResult<()>;
}
