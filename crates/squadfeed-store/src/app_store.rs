//! In-process [`Store`] implementation.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use squadfeed_cache::keys;
use squadfeed_core::{AppError, EventBus};
use squadfeed_core::config::notification::NotificationConfig;
use squadfeed_core::result::AppResult;
use squadfeed_core::traits::{KeyValueStore, SocketSender};
use squadfeed_core::types::{NotificationId, PostId, Route, UserId};
use squadfeed_entity::activity::ActivityList;
use squadfeed_entity::feed::FeedItem;
use squadfeed_entity::notification::{Notification, NotificationCacheRecord};
use squadfeed_entity::post::Post;
use squadfeed_entity::user::User;

use crate::action::Action;
use crate::event::StoreEvent;
use crate::mutation::Mutation;
use crate::state::AppState;
use crate::traits::Store;

/// Shared application store.
///
/// Cloning is cheap; clones share state, session storage and the event bus.
#[derive(Debug, Clone)]
pub struct AppStore {
    state: Arc<RwLock<AppState>>,
    session: Arc<dyn KeyValueStore>,
    events: EventBus<StoreEvent>,
    config: NotificationConfig,
}

impl AppStore {
    /// Create an empty store persisting the notification cache to `session`.
    pub fn new(
        session: Arc<dyn KeyValueStore>,
        config: NotificationConfig,
        event_buffer_size: usize,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            session,
            events: EventBus::new(event_buffer_size),
            config,
        }
    }

    /// Subscribe to commits and bell events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn read(&self) -> RwLockReadGuard<'_, AppState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AppState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    // ── Getters ────────────────────────────────────────────

    /// Every notification, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.read().notifications.items.clone()
    }

    /// Unread notifications.
    pub fn unread_notifications(&self) -> Vec<Notification> {
        self.read().notifications.notify()
    }

    /// Materialized posts in first-seen order.
    pub fn posts(&self) -> Vec<Post> {
        self.read().posts.all()
    }

    /// Pending and acknowledged feed items.
    pub fn feed_items(&self) -> Vec<FeedItem> {
        self.read().feed.items.clone()
    }

    /// Posts of one activity list, in list order.
    pub fn activity_list(&self, list: ActivityList) -> Vec<Post> {
        let state = self.read();
        state
            .activity
            .list(list)
            .iter()
            .filter_map(|id| state.posts.get(id).cloned())
            .collect()
    }

    /// The session's own profile.
    pub fn me(&self) -> User {
        self.read().user.me.clone()
    }

    /// The last other profile received.
    pub fn other(&self) -> Option<User> {
        self.read().user.other.clone()
    }

    /// Whether the transport is waiting for the server's ack.
    pub fn is_pending(&self) -> bool {
        self.read().socket.pending
    }

    /// Whether the widget is open.
    pub fn is_widget_open(&self) -> bool {
        self.read().squad.widget_open
    }

    // ── Side effects ───────────────────────────────────────

    fn persist_notifications(&self, items: Vec<Notification>, ts: Option<i64>) {
        let ts = ts.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
        let record = NotificationCacheRecord::new(items, ts);
        let result = serde_json::to_string(&record)
            .map_err(AppError::from)
            .and_then(|raw| self.session.set(keys::NOTIFICATIONS, &raw));
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist notification cache");
        }
    }

    fn schedule_banner_clear(&self, id: NotificationId) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!(id = %id, "No runtime; banner stays until viewed");
            return;
        };
        let store = self.clone();
        let timeout = self.config.banner_timeout();
        handle.spawn(async move {
            tokio::time::sleep(timeout).await;
            store.commit(Mutation::HideBanner(id));
        });
    }

    fn merge_received(&self, raw: Value) -> AppResult<Post> {
        let post = Post::from_value(raw.clone())?;
        let Some(mut existing) = post.id().and_then(|id| self.post_by_id(id)) else {
            return Ok(post);
        };
        existing.update(&raw)?;
        existing.unset_correlation_id();
        Ok(existing.normalized())
    }
}

#[async_trait]
impl Store for AppStore {
    fn commit(&self, mutation: Mutation) {
        let (effects, persisted) = {
            let mut state = self.write();
            let effects = state.apply(&mutation);
            let persisted = effects
                .persist_notifications
                .map(|ts| (state.notifications.items.clone(), ts));
            (effects, persisted)
        };

        if let Some((items, ts)) = persisted {
            self.persist_notifications(items, ts);
        }
        if let Some(id) = effects.hide_banner_later {
            self.schedule_banner_clear(id);
        }
        self.events.publish(StoreEvent::Committed(mutation));
        if effects.bell {
            self.events.publish(StoreEvent::bell());
        }
    }

    async fn dispatch(&self, action: Action) -> AppResult<()> {
        debug!(action = action.name(), "Dispatching action");
        match action {
            Action::ReceiveItem(raw) => {
                let post = self.merge_received(raw)?;
                self.commit(Mutation::UpsertPosts(vec![post]));
            }
            Action::ReceiveBulk(posts) => self.commit(Mutation::UpsertPosts(posts)),
            Action::ModifyLike { delta, post } => {
                self.commit(Mutation::ModifyLikeCount { delta, post })
            }
            Action::SaveFeedItem(mut envelope) => {
                envelope.data.guid = None;
                self.commit(Mutation::AddFeedItem(envelope.data.clone()));
                if self.is_connected() {
                    if let Some(socket) = self.socket() {
                        socket.send_obj(serde_json::to_value(&envelope)?);
                    }
                }
            }
            Action::ReceiveFeedItem(item) => self.commit(Mutation::FeedItemLoaded(item)),
        }
        Ok(())
    }

    fn socket(&self) -> Option<Arc<dyn SocketSender>> {
        self.read().socket.handle.clone()
    }

    fn is_socket_auth(&self) -> bool {
        self.read().socket.is_auth
    }

    fn is_connected(&self) -> bool {
        self.read().socket.is_connected
    }

    fn merchant_id(&self) -> Option<String> {
        self.read().merchant_id.clone()
    }

    fn me_user_id(&self) -> Option<UserId> {
        self.read().user.me.id().cloned()
    }

    fn squad_route(&self) -> Route {
        self.read().squad.route.clone()
    }

    fn post_by_id(&self, id: &PostId) -> Option<Post> {
        self.read().posts.get(id).cloned()
    }

    fn resolve_posts(&self, entries: &[Value]) -> Vec<Post> {
        let state = self.read();
        entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(id) => {
                    let id = PostId::from(id.as_str());
                    Some(state.posts.get(&id).cloned().unwrap_or_else(|| {
                        debug!(post_id = %id, "List references unknown post, keeping id");
                        Post::stub(id)
                    }))
                }
                Value::Object(map) => {
                    let id = ["guid", "postId"]
                        .iter()
                        .find_map(|k| map.get(*k).and_then(Value::as_str))
                        .or_else(|| {
                            map.get("item")
                                .and_then(|i| i.get("itemId"))
                                .and_then(Value::as_str)
                        })
                        .map(PostId::from);
                    if let Some(known) = id.as_ref().and_then(|id| state.posts.get(id)) {
                        return Some(known.clone());
                    }
                    let mut post = match Post::from_value(entry.clone()) {
                        Ok(post) => post,
                        Err(e) => {
                            warn!(error = %e, "List entry is not a post, keeping raw fields");
                            raw_post(id.clone(), map)
                        }
                    };
                    if post.guid.is_none() {
                        post.guid = id;
                        post.post_id = post.guid.clone();
                    }
                    Some(post)
                }
                other => {
                    warn!(entry = %other, "Skipping list entry");
                    None
                }
            })
            .collect()
    }
}

/// Stub post carrying the fields of an entry that does not parse as a post.
///
/// Fields the post model owns are left at their defaults.
fn raw_post(id: Option<PostId>, raw: &Map<String, Value>) -> Post {
    let mut post = id.map(Post::stub).unwrap_or_default();
    let owned = match serde_json::to_value(&post) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    post.extra = raw
        .iter()
        .filter(|(key, _)| !owned.contains_key(*key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    post
}
