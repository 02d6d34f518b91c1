//! Realtime transport configuration.

use serde::{Deserialize, Serialize};

/// WebSocket transport configuration.
///
/// The connection is always opened manually, so there is no auto-connect
/// switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// WebSocket endpoint URL, used verbatim.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Capacity of the socket event bus per subscriber.
    #[serde(default = "default_event_buffer")]
    pub event_buffer_size: usize,
    /// Capacity of the store event bus per subscriber.
    #[serde(default = "default_event_buffer")]
    pub store_event_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            event_buffer_size: default_event_buffer(),
            store_event_buffer_size: default_event_buffer(),
        }
    }
}

fn default_endpoint() -> String {
    "ws://localhost:8080/ws".to_string()
}

fn default_event_buffer() -> usize {
    1024
}
