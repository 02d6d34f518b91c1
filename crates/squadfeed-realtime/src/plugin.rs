//! Wiring of transport, store bindings and lifecycle into one running service.

use std::sync::Arc;

use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use squadfeed_cache::StorageManager;
use squadfeed_core::config::AppConfig;
use squadfeed_core::error::{AppError, ErrorKind};
use squadfeed_core::result::AppResult;
use squadfeed_core::traits::{KeyValueStore, Navigator};
use squadfeed_store::Store;

use crate::bootstrap::{SocketIntegration, init_socket};
use crate::connection::{SocketEvent, read_credential};
use crate::lifecycle::{ConnectionState, LifecycleMachine};

/// The installed socket layer.
///
/// One task drains the transport events in delivery order, applying the
/// socket flags and then the lifecycle for each event.
#[derive(Debug)]
pub struct SocketPlugin {
    integration: SocketIntegration,
    lifecycle: Arc<LifecycleMachine>,
    task: JoinHandle<()>,
}

impl SocketPlugin {
    /// Build the WebSocket integration from configuration and install it.
    pub fn from_config(
        config: &AppConfig,
        store: Arc<dyn Store>,
        storage: &StorageManager,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let integration = init_socket(
            &config.realtime.endpoint,
            store,
            storage.durable(),
            config.realtime.event_buffer_size,
        );
        Self::install(integration, navigator, storage.durable())
    }

    /// Start the event loop and connect if a credential is stored.
    ///
    /// Must be called from within a tokio runtime.
    pub fn install(
        integration: SocketIntegration,
        navigator: Arc<dyn Navigator>,
        durable: Arc<dyn KeyValueStore>,
    ) -> AppResult<Self> {
        let handle = tokio::runtime::Handle::try_current().map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Socket plugin needs a tokio runtime", e)
        })?;

        let lifecycle = Arc::new(LifecycleMachine::new(
            integration.store(),
            navigator,
            Arc::clone(&durable),
            integration.control(),
        ));
        let events = integration.subscribe();
        let task = handle.spawn(Self::run(integration.clone(), Arc::clone(&lifecycle), events));

        if read_credential(durable.as_ref()).is_some() {
            info!("Credential found, connecting");
            integration.connect();
        } else {
            info!("No credential, waiting for an explicit connect");
        }

        Ok(Self {
            integration,
            lifecycle,
            task,
        })
    }

    async fn run(
        integration: SocketIntegration,
        lifecycle: Arc<LifecycleMachine>,
        mut events: Receiver<SocketEvent>,
    ) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    integration.apply(&event);
                    lifecycle.handle(event).await;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Socket event loop lagged, events lost");
                    Self::resync(&integration, &lifecycle).await;
                }
                Err(RecvError::Closed) => break,
            }
        }
        debug!("Socket event loop ended");
    }

    /// After lost events, run close handling for a session whose transport
    /// is no longer active.
    async fn resync(integration: &SocketIntegration, lifecycle: &LifecycleMachine) {
        if integration.control().is_active() || lifecycle.state() == ConnectionState::Disconnected
        {
            return;
        }
        info!("Transport inactive after lost events, closing session");
        let event = SocketEvent::Close {
            reason: Some("events lost".to_string()),
        };
        integration.apply(&event);
        lifecycle.handle(event).await;
    }

    /// Open the connection, e.g. after a login stored a credential.
    pub fn connect(&self) {
        self.integration.connect();
    }

    /// The lifecycle machine.
    pub fn lifecycle(&self) -> &LifecycleMachine {
        &self.lifecycle
    }

    /// The store bindings.
    pub fn integration(&self) -> &SocketIntegration {
        &self.integration
    }

    /// Close the connection and stop the event loop.
    pub fn shutdown(self) {
        self.integration.control().disconnect();
        self.task.abort();
        info!("Socket plugin stopped");
    }
}
