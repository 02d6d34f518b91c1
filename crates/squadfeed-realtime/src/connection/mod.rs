//! Socket transport, events, and the sanitizing sender.

pub mod event;
pub mod sanitizer;
pub mod transport;

pub use event::SocketEvent;
pub use sanitizer::{TokenSocket, read_credential};
pub use transport::{SocketControl, SocketTransport, WsTransport};
