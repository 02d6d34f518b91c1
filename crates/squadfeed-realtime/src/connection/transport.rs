//! WebSocket transport over `tokio-tungstenite`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::{broadcast, mpsc};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use squadfeed_core::EventBus;
use squadfeed_core::error::{AppError, ErrorKind};
use squadfeed_core::traits::SocketSender;

use super::event::SocketEvent;
use crate::message::serializer::{parse_frame, serialize_outbound};

/// Opening and closing the connection.
pub trait SocketControl: Send + Sync + std::fmt::Debug + 'static {
    /// Start connecting. Does nothing while a connection is active.
    fn connect(&self);

    /// Close the connection. Does nothing when already closed.
    fn disconnect(&self);

    /// Whether a connection is being opened or is open.
    fn is_active(&self) -> bool;
}

/// A transport: raw sends, connection control, and an event stream.
pub trait SocketTransport: SocketSender + SocketControl {
    /// Subscribe to transport events published from now on.
    fn subscribe(&self) -> broadcast::Receiver<SocketEvent>;
}

/// WebSocket client transport.
///
/// One reader task per connection publishes [`SocketEvent`]s; outbound
/// frames go through an unbounded channel to a writer task.
#[derive(Debug, Clone)]
pub struct WsTransport {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    endpoint: String,
    events: EventBus<SocketEvent>,
    outbound: Mutex<Option<mpsc::UnboundedSender<Message>>>,
    active: AtomicBool,
}

impl Inner {
    fn outbound(&self) -> MutexGuard<'_, Option<mpsc::UnboundedSender<Message>>> {
        self.outbound.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn finish(&self, reason: Option<String>) {
        self.outbound().take();
        self.active.store(false, Ordering::SeqCst);
        info!(endpoint = %self.endpoint, reason = ?reason, "WebSocket closed");
        self.events.publish(SocketEvent::Close { reason });
    }
}

impl WsTransport {
    /// Transport for `endpoint`, used verbatim.
    pub fn new(endpoint: impl Into<String>, event_buffer_size: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                endpoint: endpoint.into(),
                events: EventBus::new(event_buffer_size),
                outbound: Mutex::new(None),
                active: AtomicBool::new(false),
            }),
        }
    }

    /// The endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    async fn run(inner: Arc<Inner>) {
        let stream = match connect_async(inner.endpoint.as_str()).await {
            Ok((stream, _)) => stream,
            Err(e) => {
                let err = AppError::with_source(
                    ErrorKind::Transport,
                    format!("connect to {} failed", inner.endpoint),
                    e,
                );
                warn!(error = %err, "WebSocket connect failed");
                inner.events.publish(SocketEvent::Error(err.to_string()));
                inner.finish(Some(err.to_string()));
                return;
            }
        };

        let (mut write, mut read) = stream.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
        *inner.outbound() = Some(tx);

        tokio::spawn(async move {
            while let Some(frame) = rx.recv().await {
                if let Err(e) = write.send(frame).await {
                    warn!(error = %e, "WebSocket write failed");
                    break;
                }
            }
            let _ = write.close().await;
        });

        info!(endpoint = %inner.endpoint, "WebSocket connected");
        inner.events.publish(SocketEvent::Open);

        let mut reason = None;
        while let Some(frame) = read.next().await {
            match frame {
                Ok(Message::Text(text)) => match parse_frame(text.as_str()) {
                    Ok(envelope) => {
                        inner.events.publish(SocketEvent::Message(envelope));
                    }
                    Err(e) => warn!(error = %e, "Dropping malformed frame"),
                },
                Ok(Message::Close(frame)) => {
                    reason = frame.map(|f| f.reason.as_str().to_string());
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    let err = AppError::with_source(ErrorKind::Transport, "read failed", e);
                    warn!(error = %err, "WebSocket read failed");
                    inner.events.publish(SocketEvent::Error(err.to_string()));
                    reason = Some(err.to_string());
                    break;
                }
            }
        }

        inner.finish(reason);
    }
}

impl SocketControl for WsTransport {
    fn connect(&self) {
        if self.inner.active.swap(true, Ordering::SeqCst) {
            debug!("WebSocket already active");
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime, cannot connect");
            self.inner.active.store(false, Ordering::SeqCst);
            return;
        };
        info!(endpoint = %self.inner.endpoint, "WebSocket connecting");
        self.inner.events.publish(SocketEvent::Connecting);
        handle.spawn(Self::run(Arc::clone(&self.inner)));
    }

    fn disconnect(&self) {
        if self.inner.outbound().take().is_some() {
            info!(endpoint = %self.inner.endpoint, "WebSocket disconnecting");
        }
    }

    fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }
}

impl SocketSender for WsTransport {
    fn send_obj(&self, envelope: Value) {
        let text = match serialize_outbound(&envelope) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Failed to serialize outbound envelope");
                return;
            }
        };
        match self.inner.outbound().as_ref() {
            Some(tx) => {
                if tx.send(Message::Text(text.into())).is_err() {
                    debug!("Writer gone, dropping outbound envelope");
                }
            }
            None => debug!("Not connected, dropping outbound envelope"),
        }
    }
}

impl SocketTransport for WsTransport {
    fn subscribe(&self) -> broadcast::Receiver<SocketEvent> {
        self.inner.events.subscribe()
    }
}
