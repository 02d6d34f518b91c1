//! Outbound sanitizing sender.

use std::sync::Arc;

use serde_json::Value;
use tracing::{trace, warn};

use squadfeed_cache::keys;
use squadfeed_core::traits::{KeyValueStore, SocketSender};

/// Read the credential from durable storage. Empty or unreadable means absent.
pub fn read_credential(durable: &dyn KeyValueStore) -> Option<String> {
    match durable.get(keys::USER_TOKEN) {
        Ok(token) => token.filter(|t| !t.is_empty()),
        Err(e) => {
            warn!(error = %e, "Failed to read credential");
            None
        }
    }
}

/// Wraps a raw transport sender.
///
/// Every send looks up the credential at send time; without one the send is
/// dropped. With one, [`keys::SENSITIVE_FIELDS`] are removed and the
/// envelope is forwarded exactly once. Nothing is injected.
#[derive(Debug, Clone)]
pub struct TokenSocket {
    transport: Arc<dyn SocketSender>,
    durable: Arc<dyn KeyValueStore>,
}

impl TokenSocket {
    /// Wrap `transport`, reading the credential from `durable`.
    pub fn new(transport: Arc<dyn SocketSender>, durable: Arc<dyn KeyValueStore>) -> Self {
        Self { transport, durable }
    }
}

impl SocketSender for TokenSocket {
    fn send_obj(&self, mut envelope: Value) {
        if read_credential(self.durable.as_ref()).is_none() {
            trace!("No credential, dropping outbound envelope");
            return;
        }
        if let Value::Object(map) = &mut envelope {
            for field in keys::SENSITIVE_FIELDS {
                map.remove(field);
            }
        }
        self.transport.send_obj(envelope);
    }
}
