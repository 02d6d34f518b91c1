//! Notification list served from session storage while fresh.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use squadfeed_cache::keys;
use squadfeed_core::config::notification::NotificationConfig;
use squadfeed_core::traits::KeyValueStore;
use squadfeed_entity::notification::NotificationCacheRecord;
use squadfeed_store::{Mutation, Store};

use crate::message::builder;

/// Serves notifications from the session record or asks the server.
#[derive(Debug, Clone)]
pub struct NotificationCache {
    session: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

/// Where [`NotificationCache::fetch_notifications`] got the list from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// Hydrated from the session record.
    Cache,
    /// Requested from the server.
    Remote,
}

impl NotificationCache {
    /// Cache over `session` with the configured TTL.
    pub fn new(session: Arc<dyn KeyValueStore>, config: &NotificationConfig) -> Self {
        Self {
            session,
            ttl: config.cache_ttl(),
        }
    }

    /// Fetch notifications as of the current wall clock.
    pub fn fetch_notifications(&self, store: &dyn Store) -> FetchSource {
        self.fetch_at(store, chrono::Utc::now().timestamp_millis())
    }

    /// Fetch notifications as of `now_ms`.
    ///
    /// A fresh, non-empty record is committed with its own timestamp.
    /// Anything else sends `fetchNotifications`; the reply arrives later
    /// through the socket.
    pub fn fetch_at(&self, store: &dyn Store, now_ms: i64) -> FetchSource {
        if let Some(record) = self.read_record().filter(|r| r.is_fresh(now_ms, self.ttl)) {
            debug!(count = record.items.len(), "Serving notifications from session cache");
            store.commit(Mutation::ReceiveNotifications {
                notifications: record.items,
                ts: Some(record.ts),
            });
            return FetchSource::Cache;
        }

        match store.socket() {
            Some(socket) => socket.send_obj(builder::fetch_notifications()),
            None => debug!("No socket installed, cannot fetch notifications"),
        }
        FetchSource::Remote
    }

    fn read_record(&self) -> Option<NotificationCacheRecord> {
        match self.session.get(keys::NOTIFICATIONS) {
            Ok(raw) => raw.as_deref().and_then(NotificationCacheRecord::parse),
            Err(e) => {
                warn!(error = %e, "Failed to read notification cache");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{Value, json};

    use squadfeed_cache::memory::MemoryStorage;
    use squadfeed_core::traits::SocketSender;
    use squadfeed_entity::notification::Notification;
    use squadfeed_store::AppStore;

    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[derive(Debug, Default)]
    struct Recorder(Mutex<Vec<Value>>);

    impl SocketSender for Recorder {
        fn send_obj(&self, envelope: Value) {
            self.0.lock().unwrap().push(envelope);
        }
    }

    struct Fixture {
        session: MemoryStorage,
        store: AppStore,
        sent: Arc<Recorder>,
        cache: NotificationCache,
    }

    fn fixture() -> Fixture {
        let session = MemoryStorage::new();
        let store = AppStore::new(Arc::new(session.clone()), NotificationConfig::default(), 16);
        let sent = Arc::new(Recorder::default());
        let handle: Arc<dyn SocketSender> = sent.clone();
        store.commit(Mutation::SetSocket(Some(handle)));
        let cache = NotificationCache::new(Arc::new(session.clone()), &NotificationConfig::default());
        Fixture {
            session,
            store,
            sent,
            cache,
        }
    }

    fn seed(session: &MemoryStorage, items: Vec<Notification>, age: Duration) {
        let record = NotificationCacheRecord::new(items, NOW - age.as_millis() as i64);
        session
            .set(keys::NOTIFICATIONS, &serde_json::to_string(&record).unwrap())
            .unwrap();
    }

    #[test]
    fn test_fresh_record_is_served_without_remote_call() {
        let f = fixture();
        seed(&f.session, vec![Notification::new("a")], Duration::from_secs(4 * 60));

        assert_eq!(f.cache.fetch_at(&f.store, NOW), FetchSource::Cache);
        assert!(f.sent.0.lock().unwrap().is_empty());
        assert_eq!(f.store.notifications().len(), 1);

        let persisted = NotificationCacheRecord::parse(
            &f.session.get(keys::NOTIFICATIONS).unwrap().unwrap(),
        )
        .unwrap();
        assert_eq!(persisted.ts, NOW - 4 * 60 * 1000);
    }

    #[test]
    fn test_stale_record_goes_remote() {
        let f = fixture();
        seed(&f.session, vec![Notification::new("a")], Duration::from_secs(5 * 60 + 1));

        assert_eq!(f.cache.fetch_at(&f.store, NOW), FetchSource::Remote);
        assert_eq!(*f.sent.0.lock().unwrap(), vec![json!({ "type": "fetchNotifications" })]);
        assert!(f.store.notifications().is_empty());
    }

    #[test]
    fn test_empty_missing_or_garbage_goes_remote() {
        let f = fixture();
        assert_eq!(f.cache.fetch_at(&f.store, NOW), FetchSource::Remote);

        seed(&f.session, Vec::new(), Duration::ZERO);
        assert_eq!(f.cache.fetch_at(&f.store, NOW), FetchSource::Remote);

        f.session.set(keys::NOTIFICATIONS, "{broken").unwrap();
        assert_eq!(f.cache.fetch_at(&f.store, NOW), FetchSource::Remote);

        assert_eq!(f.sent.0.lock().unwrap().len(), 3);
    }
}
