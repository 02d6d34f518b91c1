//! Outbound socket sending.

/// Anything that can put a JSON envelope on the wire.
///
/// Sends are fire-and-forget: callers are never told whether the envelope
/// left the process.
pub trait SocketSender: Send + Sync + std::fmt::Debug + 'static {
    /// Send one envelope.
    fn send_obj(&self, envelope: serde_json::Value);
}
