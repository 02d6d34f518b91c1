//! State slices and the pure mutation reducer.

pub mod activity;
pub mod feed;
pub mod notification;
pub mod post;
pub mod socket;
pub mod squad;
pub mod user;

use tracing::debug;

use crate::mutation::Mutation;

use self::activity::ActivityState;
use self::feed::FeedState;
use self::notification::NotificationState;
use self::post::PostState;
use self::socket::SocketState;
use self::squad::SquadState;
use self::user::UserState;

/// Side effects a mutation asks the store to perform once state is updated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Effects {
    /// Persist the notification list to session storage with this stamp.
    pub persist_notifications: Option<Option<i64>>,
    /// Ring the unread indicator.
    pub bell: bool,
    /// Schedule a banner clear for this notification.
    pub hide_banner_later: Option<squadfeed_core::types::NotificationId>,
}

/// Whole client state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Connection flags and send handle.
    pub socket: SocketState,
    /// Shop the widget is embedded in.
    pub merchant_id: Option<String>,
    /// Profiles.
    pub user: UserState,
    /// Materialized posts.
    pub posts: PostState,
    /// Activity lists.
    pub activity: ActivityState,
    /// Landing route and widget flags.
    pub squad: SquadState,
    /// Bell menu.
    pub notifications: NotificationState,
    /// Items shared from the host page.
    pub feed: FeedState,
}

impl AppState {
    /// Apply one mutation and report the follow-up effects.
    pub fn apply(&mut self, mutation: &Mutation) -> Effects {
        let mut effects = Effects::default();
        match mutation {
            Mutation::SetConnected(connected) => self.socket.is_connected = *connected,
            Mutation::SetSocketAuth(auth) => self.socket.is_auth = *auth,
            Mutation::SetPending(pending) => self.socket.pending = *pending,
            Mutation::SetSocket(handle) => self.socket.handle = handle.clone(),
            Mutation::SetMerchant(id) => self.merchant_id = id.clone(),
            Mutation::SetMe(user) => self.user.me = user.clone(),
            Mutation::SetOther(user) => self.user.other = Some(user.clone()),
            Mutation::UpsertPosts(posts) => {
                for post in posts {
                    self.posts.upsert(post.clone());
                }
            }
            Mutation::SetPostLike { by_me, count, post } => {
                self.posts.set_like(post, *by_me, *count);
            }
            Mutation::ModifyLikeCount { delta, post } => self.posts.modify_like(post, *delta),
            Mutation::AddComment { comment, post } => self.posts.add_comment(post, comment.clone()),
            Mutation::ReceiveReaction(comments) => self.posts.receive_reaction(comments),
            Mutation::SetListOfType { posts, list } => self.activity.set_list(*list, posts),
            Mutation::SetSquadParams(params) => {
                if let Some(params) = params {
                    self.squad.set_params(params);
                }
            }
            Mutation::SetWidgetState(open) => self.squad.widget_open = *open,
            Mutation::AddNotification(notification) => {
                if self.notifications.add(notification.clone()) {
                    effects.bell = true;
                    effects.hide_banner_later = Some(notification.id.clone());
                }
            }
            Mutation::ReceiveNotifications { notifications, ts } => {
                self.notifications.receive(notifications.clone());
                effects.persist_notifications = Some(*ts);
                effects.bell = self.notifications.has_unread();
            }
            Mutation::ViewNotification(id) => self.notifications.view(id),
            Mutation::ViewAllNotifications => self.notifications.view_all(),
            Mutation::HideBanner(id) => self.notifications.hide_banner(id),
            Mutation::AddFeedItem(item) => self.feed.items.push(item.clone()),
            Mutation::FeedItemLoaded(item) => self.feed.item_loaded(item),
        }
        debug!(mutation = mutation.name(), "Mutation applied");
        effects
    }
}
