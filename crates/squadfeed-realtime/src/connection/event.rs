//! Transport lifecycle events.

use serde_json::Value;

/// Something the transport observed, published in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketEvent {
    /// A connection attempt started.
    Connecting,
    /// The connection is open.
    Open,
    /// A JSON envelope arrived.
    Message(Value),
    /// The connection closed or could not be opened.
    Close {
        /// Close reason, when the peer or the failure gave one.
        reason: Option<String>,
    },
    /// A transport error that did not by itself close the connection.
    Error(String),
}
