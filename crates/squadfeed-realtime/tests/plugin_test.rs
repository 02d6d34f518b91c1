//! End-to-end tests of the installed socket layer over the real store.

mod helpers;

use std::sync::Arc;

use serde_json::json;

use squadfeed_cache::memory::MemoryStorage;
use squadfeed_core::config::notification::NotificationConfig;
use squadfeed_core::types::{PostId, Route};
use squadfeed_realtime::connection::SocketEvent;
use squadfeed_realtime::{SocketIntegration, SocketOptions, SocketPlugin};
use squadfeed_store::{AppStore, Store};

use helpers::{MockNavigator, MockTransport, TOKEN, durable, eventually};

struct Setup {
    store: Arc<AppStore>,
    transport: Arc<MockTransport>,
    navigator: Arc<MockNavigator>,
    plugin: SocketPlugin,
}

fn install(with_token: bool, route: Route) -> Setup {
    let store = Arc::new(AppStore::new(
        Arc::new(MemoryStorage::new()),
        NotificationConfig::default(),
        64,
    ));
    let transport = Arc::new(MockTransport::default());
    let navigator = Arc::new(MockNavigator::at(route));
    let durable = durable(with_token);
    let integration = SocketIntegration::with_transport(
        SocketOptions::new("ws://remote.mock.com/"),
        transport.clone(),
        store.clone(),
        durable.clone(),
    );
    let plugin = SocketPlugin::install(integration, navigator.clone(), durable).unwrap();
    Setup {
        store,
        transport,
        navigator,
        plugin,
    }
}

#[tokio::test]
async fn test_no_credential_no_auto_connect() {
    let s = install(false, Route::home());
    assert_eq!(s.transport.connects(), 0);

    s.plugin.connect();
    assert_eq!(s.transport.connects(), 1);
}

#[tokio::test]
async fn test_credential_auto_connects_once() {
    let s = install(true, Route::home());
    assert_eq!(s.transport.connects(), 1);
}

#[tokio::test]
async fn test_full_session() {
    let s = install(true, Route::named("index"));

    s.transport.emit(SocketEvent::Connecting);
    s.transport.emit(SocketEvent::Open);
    assert!(eventually(|| s.store.is_connected() && s.store.socket().is_some()).await);
    assert!(s.store.is_pending());

    s.transport.emit(SocketEvent::Message(json!({ "type": "authRequest" })));
    assert!(eventually(|| !s.transport.sent().is_empty()).await);
    assert_eq!(
        s.transport.sent()[0],
        json!({ "type": "authResponse", "userToken": TOKEN, "merchantId": null })
    );

    s.transport.emit(SocketEvent::Message(json!({ "type": "authOk" })));
    assert!(eventually(|| s.store.is_socket_auth()).await);
    assert!(!s.store.is_pending());
    assert!(eventually(|| s.transport.sent().len() == 2).await);
    assert_eq!(s.transport.sent()[1], json!({ "type": "fetchUser" }));
    assert_eq!(s.navigator.pushes(), vec![Route::path("/feed")]);

    s.transport.emit(SocketEvent::Message(json!({
        "type": "singleItemPost",
        "guid": "p1",
        "text": "hello",
        "userId": "author",
    })));
    assert!(eventually(|| s.store.post_by_id(&PostId::from("p1")).is_some()).await);

    s.transport.emit(SocketEvent::Message(json!({ "type": "ping", "userId": "x" })));
    assert!(eventually(|| s.transport.sent().len() == 3).await);
    assert_eq!(s.transport.sent()[2], json!({ "type": "pong" }));

    s.transport.emit(SocketEvent::Close {
        reason: Some("server restart".to_string()),
    });
    assert!(eventually(|| !s.store.is_connected() && s.store.socket().is_none()).await);
    assert!(!s.store.is_socket_auth());
    assert_eq!(s.transport.disconnects(), 1);
    assert_eq!(s.plugin.lifecycle().state(), squadfeed_realtime::ConnectionState::Disconnected);
    assert_eq!(s.navigator.pushes().last(), Some(&Route::home()));

    s.plugin.shutdown();
}

#[tokio::test]
async fn test_lost_close_is_recovered_after_lag() {
    let s = install(true, Route::named("index"));

    s.transport.emit(SocketEvent::Open);
    s.transport.emit(SocketEvent::Message(json!({ "type": "authOk" })));
    assert!(eventually(|| s.store.is_socket_auth()).await);

    s.transport
        .active
        .store(false, std::sync::atomic::Ordering::SeqCst);
    s.transport.emit(SocketEvent::Close { reason: None });
    for _ in 0..100 {
        s.transport
            .emit(SocketEvent::Message(json!({ "type": "ping" })));
    }

    assert!(eventually(|| !s.store.is_socket_auth() && !s.store.is_connected()).await);
    assert!(s.store.socket().is_none());
    assert_eq!(s.plugin.lifecycle().state(), squadfeed_realtime::ConnectionState::Disconnected);
    assert_eq!(s.navigator.pushes().last(), Some(&Route::home()));

    s.plugin.shutdown();
}
