//! Storage manager that builds the configured durable and session backends.

use std::sync::Arc;

use tracing::info;

use squadfeed_core::config::storage::StorageConfig;
use squadfeed_core::result::AppResult;
use squadfeed_core::traits::KeyValueStore;

/// Holds the two storage scopes used by the client.
#[derive(Debug, Clone)]
pub struct StorageManager {
    /// Survives restarts (credential).
    durable: Arc<dyn KeyValueStore>,
    /// Cleared per run (notification cache).
    session: Arc<dyn KeyValueStore>,
}

impl StorageManager {
    /// Create the backends from configuration.
    pub fn new(config: &StorageConfig) -> AppResult<Self> {
        let durable: Arc<dyn KeyValueStore> = if config.durable_in_memory {
            info!("Initializing in-memory durable storage");
            Arc::new(crate::memory::MemoryStorage::new())
        } else {
            info!(path = %config.durable_path, "Initializing file durable storage");
            Arc::new(crate::file::FileStorage::open(&config.durable_path)?)
        };

        Ok(Self {
            durable,
            session: Arc::new(crate::memory::MemoryStorage::new()),
        })
    }

    /// Durable scope.
    pub fn durable(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.durable)
    }

    /// Session scope.
    pub fn session(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.session)
    }
}
