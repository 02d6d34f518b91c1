//! Connection flags.

use std::sync::Arc;

use squadfeed_core::traits::SocketSender;

/// Connection state as seen by the UI.
#[derive(Debug, Clone, Default)]
pub struct SocketState {
    /// Transport is open.
    pub is_connected: bool,
    /// Handshake completed.
    pub is_auth: bool,
    /// Waiting for the server's ack after connecting.
    pub pending: bool,
    /// Sanitizing send handle while connected.
    pub handle: Option<Arc<dyn SocketSender>>,
}
