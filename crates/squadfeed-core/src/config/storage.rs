//! Key/value storage configuration.

use serde::{Deserialize, Serialize};

/// Storage backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the durable store (credential).
    #[serde(default = "default_durable_path")]
    pub durable_path: String,
    /// Keep the durable store in memory only (tests, ephemeral runs).
    #[serde(default)]
    pub durable_in_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            durable_path: default_durable_path(),
            durable_in_memory: false,
        }
    }
}

fn default_durable_path() -> String {
    "data/local_storage.json".to_string()
}
