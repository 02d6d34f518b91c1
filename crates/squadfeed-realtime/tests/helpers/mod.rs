//! Shared test doubles for realtime integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use squadfeed_cache::keys;
use squadfeed_cache::memory::MemoryStorage;
use squadfeed_core::EventBus;
use squadfeed_core::result::AppResult;
use squadfeed_core::traits::{KeyValueStore, Navigator, SocketSender};
use squadfeed_core::types::{PostId, Route, UserId};
use squadfeed_entity::post::Post;
use squadfeed_realtime::connection::{SocketControl, SocketEvent, SocketTransport};
use squadfeed_realtime::LifecycleMachine;
use squadfeed_store::{Action, Mutation, Store};

/// Credential used by tests that need one.
pub const TOKEN: &str = "head.payload.sign";

/// One interaction with the store.
#[derive(Debug, Clone)]
pub enum Call {
    /// A commit.
    Commit(Mutation),
    /// A dispatch.
    Dispatch(Action),
}

/// Store double that records every commit and dispatch.
///
/// Only the auth flag and the socket handle follow commits, so routing
/// gates and sends behave as with the real store.
#[derive(Debug)]
pub struct RecordingStore {
    pub calls: Mutex<Vec<Call>>,
    pub auth: AtomicBool,
    pub socket: Mutex<Option<Arc<dyn SocketSender>>>,
    pub merchant: Mutex<Option<String>>,
    pub me: Mutex<Option<UserId>>,
    pub squad_route: Mutex<Route>,
    pub posts: Mutex<HashMap<PostId, Post>>,
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            auth: AtomicBool::new(false),
            socket: Mutex::new(None),
            merchant: Mutex::new(None),
            me: Mutex::new(None),
            squad_route: Mutex::new(Route::path("/default")),
            posts: Mutex::new(HashMap::new()),
        }
    }
}

impl RecordingStore {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commits(&self) -> Vec<Mutation> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Commit(m) => Some(m),
                Call::Dispatch(_) => None,
            })
            .collect()
    }

    pub fn dispatches(&self) -> Vec<Action> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Dispatch(a) => Some(a),
                Call::Commit(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn with_post(self, post: Post) -> Self {
        if let Some(id) = post.id().cloned() {
            self.posts.lock().unwrap().insert(id, post);
        }
        self
    }

    pub fn install_socket(&self, socket: Arc<dyn SocketSender>) {
        *self.socket.lock().unwrap() = Some(socket);
    }
}

#[async_trait]
impl Store for RecordingStore {
    fn commit(&self, mutation: Mutation) {
        match &mutation {
            Mutation::SetSocketAuth(auth) => self.auth.store(*auth, Ordering::SeqCst),
            Mutation::SetSocket(handle) => *self.socket.lock().unwrap() = handle.clone(),
            _ => {}
        }
        self.calls.lock().unwrap().push(Call::Commit(mutation));
    }

    async fn dispatch(&self, action: Action) -> AppResult<()> {
        self.calls.lock().unwrap().push(Call::Dispatch(action));
        tokio::task::yield_now().await;
        Ok(())
    }

    fn socket(&self) -> Option<Arc<dyn SocketSender>> {
        self.socket.lock().unwrap().clone()
    }

    fn is_socket_auth(&self) -> bool {
        self.auth.load(Ordering::SeqCst)
    }

    fn is_connected(&self) -> bool {
        self.socket.lock().unwrap().is_some()
    }

    fn merchant_id(&self) -> Option<String> {
        self.merchant.lock().unwrap().clone()
    }

    fn me_user_id(&self) -> Option<UserId> {
        self.me.lock().unwrap().clone()
    }

    fn squad_route(&self) -> Route {
        self.squad_route.lock().unwrap().clone()
    }

    fn post_by_id(&self, id: &PostId) -> Option<Post> {
        self.posts.lock().unwrap().get(id).cloned()
    }

    fn resolve_posts(&self, entries: &[Value]) -> Vec<Post> {
        entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(id) => {
                    let id = PostId::from(id.as_str());
                    Some(self.post_by_id(&id).unwrap_or_else(|| Post::stub(id)))
                }
                other => Post::from_value(other.clone()).ok(),
            })
            .collect()
    }
}

/// Sender double.
#[derive(Debug, Default)]
pub struct RecordingSocket {
    pub sent: Mutex<Vec<Value>>,
}

impl RecordingSocket {
    pub fn sent(&self) -> Vec<Value> {
        self.sent.lock().unwrap().clone()
    }
}

impl SocketSender for RecordingSocket {
    fn send_obj(&self, envelope: Value) {
        self.sent.lock().unwrap().push(envelope);
    }
}

/// Transport double: events are injected by the test.
#[derive(Debug)]
pub struct MockTransport {
    pub events: EventBus<SocketEvent>,
    pub sent: Mutex<Vec<Value>>,
    pub connects: AtomicUsize,
    pub disconnects: AtomicUsize,
    pub active: AtomicBool,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            events: EventBus::new(64),
            sent: Mutex::new(Vec::new()),
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
            active: AtomicBool::new(false),
        }
    }
}

impl MockTransport {
    pub fn emit(&self, event: SocketEvent) {
        self.events.publish(event);
    }

    pub fn sent(&self) -> Vec<Value> {
        self.sent.lock().unwrap().clone()
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

impl SocketSender for MockTransport {
    fn send_obj(&self, envelope: Value) {
        self.sent.lock().unwrap().push(envelope);
    }
}

impl SocketControl for MockTransport {
    fn connect(&self) {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.active.store(true, Ordering::SeqCst);
    }

    fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        self.active.store(false, Ordering::SeqCst);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl SocketTransport for MockTransport {
    fn subscribe(&self) -> broadcast::Receiver<SocketEvent> {
        self.events.subscribe()
    }
}

/// Navigator double recording pushes.
#[derive(Debug)]
pub struct MockNavigator {
    pub route: Mutex<Route>,
    pub pushes: Mutex<Vec<Route>>,
}

impl MockNavigator {
    pub fn at(route: Route) -> Self {
        Self {
            route: Mutex::new(route),
            pushes: Mutex::new(Vec::new()),
        }
    }

    pub fn pushes(&self) -> Vec<Route> {
        self.pushes.lock().unwrap().clone()
    }
}

impl Navigator for MockNavigator {
    fn current_route(&self) -> Route {
        self.route.lock().unwrap().clone()
    }

    fn push(&self, target: Route) {
        *self.route.lock().unwrap() = target.clone();
        self.pushes.lock().unwrap().push(target);
    }
}

/// Durable storage, optionally holding the test credential.
pub fn durable(with_token: bool) -> Arc<MemoryStorage> {
    let storage = MemoryStorage::new();
    if with_token {
        storage.set(keys::USER_TOKEN, TOKEN).unwrap();
    }
    Arc::new(storage)
}

/// A lifecycle machine over doubles.
pub struct Harness {
    pub store: Arc<RecordingStore>,
    pub socket: Arc<RecordingSocket>,
    pub transport: Arc<MockTransport>,
    pub navigator: Arc<MockNavigator>,
    pub durable: Arc<MemoryStorage>,
    pub machine: LifecycleMachine,
}

impl Harness {
    pub fn new(route: Route, with_token: bool) -> Self {
        Self::with_store(RecordingStore::default(), route, with_token)
    }

    pub fn with_store(store: RecordingStore, route: Route, with_token: bool) -> Self {
        let store = Arc::new(store);
        let socket = Arc::new(RecordingSocket::default());
        store.install_socket(socket.clone());
        let transport = Arc::new(MockTransport::default());
        let navigator = Arc::new(MockNavigator::at(route));
        let durable = durable(with_token);
        let machine = LifecycleMachine::new(
            store.clone(),
            navigator.clone(),
            durable.clone(),
            transport.clone(),
        );
        Self {
            store,
            socket,
            transport,
            navigator,
            durable,
            machine,
        }
    }

    pub async fn message(&self, envelope: Value) {
        self.machine.handle(SocketEvent::Message(envelope)).await;
    }
}

/// Layer counting events at `WARN` or above.
#[derive(Debug, Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarnCounter {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if *event.metadata().level() <= tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Poll `condition` until it holds or a second passes.
pub async fn eventually(condition: impl Fn() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
