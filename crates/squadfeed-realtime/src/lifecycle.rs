//! Auth handshake and connection lifecycle.
//!
//! ```text
//! Disconnected --connect--> Connecting --open--> AuthPending --authOk--> Authenticated
//!       ^                                                                     |
//!       +------------------------------ close (from any state) ---------------+
//! ```

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{debug, info, trace, warn};

use squadfeed_core::traits::{KeyValueStore, Navigator};
use squadfeed_core::types::Route;
use squadfeed_store::{Mutation, Store};

use crate::connection::{SocketControl, SocketEvent, read_credential};
use crate::message::builder;
use crate::message::serializer::deserialize_inbound;
use crate::message::InboundMessage;
use crate::router;

/// Where the connection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection.
    Disconnected,
    /// Connecting.
    Connecting,
    /// Open, waiting for `authOk`.
    AuthPending,
    /// Handshake completed.
    Authenticated,
}

/// Reacts to transport events: runs the handshake, gates inbound messages
/// on the store's auth flag, and cleans up on close.
#[derive(Debug)]
pub struct LifecycleMachine {
    store: Arc<dyn Store>,
    navigator: Arc<dyn Navigator>,
    durable: Arc<dyn KeyValueStore>,
    control: Arc<dyn SocketControl>,
    state: Mutex<ConnectionState>,
}

impl LifecycleMachine {
    /// Create a machine in the `Disconnected` state.
    pub fn new(
        store: Arc<dyn Store>,
        navigator: Arc<dyn Navigator>,
        durable: Arc<dyn KeyValueStore>,
        control: Arc<dyn SocketControl>,
    ) -> Self {
        Self {
            store,
            navigator,
            durable,
            control,
            state: Mutex::new(ConnectionState::Disconnected),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn transition(&self, to: ConnectionState) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state != to {
            info!(from = ?*state, to = ?to, "Connection state changed");
            *state = to;
        }
    }

    fn send(&self, envelope: Value) {
        match self.store.socket() {
            Some(socket) => socket.send_obj(envelope),
            None => debug!(envelope = %envelope, "No socket installed, dropping send"),
        }
    }

    /// Handle one transport event.
    pub async fn handle(&self, event: SocketEvent) {
        match event {
            SocketEvent::Connecting => self.transition(ConnectionState::Connecting),
            SocketEvent::Open => self.transition(ConnectionState::AuthPending),
            SocketEvent::Message(envelope) => self.on_message(envelope).await,
            SocketEvent::Close { reason } => self.on_close(reason),
            SocketEvent::Error(error) => warn!(error = %error, "Socket error"),
        }
    }

    async fn on_message(&self, envelope: Value) {
        let message = match deserialize_inbound(&envelope) {
            Ok(message) => message,
            Err(e) if self.store.is_socket_auth() => {
                warn!(error = %e, kind = ?envelope.get("type"), "Dropping unreadable message");
                return;
            }
            Err(e) => {
                trace!(error = %e, "Not authenticated, dropping unreadable message");
                return;
            }
        };

        match message {
            InboundMessage::AuthRequest => self.on_auth_request(),
            InboundMessage::AuthOk => self.on_auth_ok(),
            other if self.store.is_socket_auth() => {
                if let Err(e) = router::dispatch(self.store.as_ref(), other).await {
                    warn!(error = %e, "Message handling failed");
                }
            }
            other => trace!(kind = other.kind(), "Not authenticated, dropping message"),
        }
    }

    fn on_auth_request(&self) {
        let Some(token) = read_credential(self.durable.as_ref()) else {
            debug!("authRequest without credential, ignoring");
            return;
        };
        let merchant = self.store.merchant_id();
        self.send(builder::auth_response(&token, merchant.as_deref()));
    }

    fn on_auth_ok(&self) {
        self.store.commit(Mutation::SetSocketAuth(true));
        self.store.commit(Mutation::SetPending(false));
        self.transition(ConnectionState::Authenticated);

        if self.navigator.current_route().is_home() {
            self.navigator.push(self.store.squad_route());
        }
        self.send(builder::fetch_user());
    }

    fn on_close(&self, reason: Option<String>) {
        info!(reason = ?reason, "Socket closed");
        self.store.commit(Mutation::SetSocketAuth(false));
        self.store.commit(Mutation::SetPending(false));
        self.store.commit(Mutation::SetSocket(None));
        self.control.disconnect();
        self.transition(ConnectionState::Disconnected);

        if !self.navigator.current_route().is_home() {
            self.navigator.push(Route::home());
        }
    }
}
