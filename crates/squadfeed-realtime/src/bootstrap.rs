//! Transport construction and the store bindings every connection needs.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use squadfeed_core::traits::{KeyValueStore, SocketSender};
use squadfeed_store::{Mutation, Store};

use crate::connection::{SocketControl, SocketEvent, SocketTransport, TokenSocket, WsTransport};

/// How the transport is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketOptions {
    /// Endpoint URL, never rewritten. The credential is sent in the
    /// handshake, not in the URL.
    pub endpoint: String,
    /// Connection opens only on an explicit `connect`. Always `true`.
    pub connect_manually: bool,
}

impl SocketOptions {
    /// Options for `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            connect_manually: true,
        }
    }
}

/// A transport bound to a store.
///
/// [`SocketIntegration::apply`] commits the socket flags for transport
/// events; everything protocol-level is left to the lifecycle machine.
#[derive(Debug, Clone)]
pub struct SocketIntegration {
    options: SocketOptions,
    transport: Arc<dyn SocketTransport>,
    control: Arc<dyn SocketControl>,
    sender: Arc<dyn SocketSender>,
    store: Arc<dyn Store>,
}

/// Build the WebSocket integration for `endpoint`. Does not connect.
pub fn init_socket(
    endpoint: &str,
    store: Arc<dyn Store>,
    durable: Arc<dyn KeyValueStore>,
    event_buffer_size: usize,
) -> SocketIntegration {
    let options = SocketOptions::new(endpoint);
    let transport = Arc::new(WsTransport::new(options.endpoint.clone(), event_buffer_size));
    info!(endpoint = %options.endpoint, "Socket integration initialized");
    SocketIntegration::with_transport(options, transport, store, durable)
}

impl SocketIntegration {
    /// Bind an existing transport.
    pub fn with_transport<T: SocketTransport>(
        options: SocketOptions,
        transport: Arc<T>,
        store: Arc<dyn Store>,
        durable: Arc<dyn KeyValueStore>,
    ) -> Self {
        let raw: Arc<dyn SocketSender> = transport.clone();
        let control: Arc<dyn SocketControl> = transport.clone();
        Self {
            options,
            transport,
            control,
            sender: Arc::new(TokenSocket::new(raw, durable)),
            store,
        }
    }

    /// Transport options.
    pub fn options(&self) -> &SocketOptions {
        &self.options
    }

    /// The sanitizing sender installed in the store while connected.
    pub fn sender(&self) -> Arc<dyn SocketSender> {
        Arc::clone(&self.sender)
    }

    /// Connection control.
    pub fn control(&self) -> Arc<dyn SocketControl> {
        Arc::clone(&self.control)
    }

    /// The bound store.
    pub fn store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.store)
    }

    /// Subscribe to transport events.
    pub fn subscribe(&self) -> broadcast::Receiver<SocketEvent> {
        self.transport.subscribe()
    }

    /// Open the connection.
    pub fn connect(&self) {
        self.control.connect();
    }

    /// Commit the socket flags a transport event implies.
    pub fn apply(&self, event: &SocketEvent) {
        match event {
            SocketEvent::Open => {
                self.store.commit(Mutation::SetConnected(true));
                self.store.commit(Mutation::SetPending(true));
                self.store.commit(Mutation::SetSocket(Some(self.sender())));
            }
            SocketEvent::Close { .. } => self.store.commit(Mutation::SetConnected(false)),
            SocketEvent::Connecting | SocketEvent::Message(_) | SocketEvent::Error(_) => {}
        }
    }
}
