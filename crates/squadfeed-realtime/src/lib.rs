//! # squadfeed-realtime
//!
//! Realtime WebSocket layer for the SquadFeed client. Provides:
//!
//! - A sanitizing sender that gates outbound envelopes on the stored credential
//! - Transport bootstrap over `tokio-tungstenite` with manual connect
//! - The auth handshake and connection lifecycle state machine
//! - Routing of inbound messages into store commits and dispatches
//! - A session-scoped notification cache with a freshness window

pub mod bootstrap;
pub mod connection;
pub mod lifecycle;
pub mod message;
pub mod notification;
pub mod plugin;
pub mod router;

pub use bootstrap::{SocketIntegration, SocketOptions, init_socket};
pub use connection::sanitizer::TokenSocket;
pub use lifecycle::{ConnectionState, LifecycleMachine};
pub use message::InboundMessage;
pub use notification::cache::NotificationCache;
pub use plugin::SocketPlugin;
