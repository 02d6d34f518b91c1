//! Synchronous state mutations.

use std::sync::Arc;

use squadfeed_core::traits::SocketSender;
use squadfeed_core::types::NotificationId;
use squadfeed_entity::activity::ActivityList;
use squadfeed_entity::feed::FeedItem;
use squadfeed_entity::notification::Notification;
use squadfeed_entity::post::{Comment, Post};
use squadfeed_entity::user::User;

/// Every state change the store accepts.
#[derive(Debug, Clone)]
pub enum Mutation {
    // ── Socket ─────────────────────────────────────────────
    /// Transport opened (`true`) or closed (`false`).
    SetConnected(bool),
    /// Handshake completed (`true`) or session dropped (`false`).
    SetSocketAuth(bool),
    /// Waiting for the server to acknowledge a fresh connection.
    SetPending(bool),
    /// Install or clear the sanitizing send handle.
    SetSocket(Option<Arc<dyn SocketSender>>),

    // ── Merchant ───────────────────────────────────────────
    /// Shop the widget is embedded in.
    SetMerchant(Option<String>),

    // ── User ───────────────────────────────────────────────
    /// The session's own profile.
    SetMe(User),
    /// Another user's profile being viewed.
    SetOther(User),

    // ── Posts ──────────────────────────────────────────────
    /// Insert or replace posts by id.
    UpsertPosts(Vec<Post>),
    /// Absolute like state of a post.
    SetPostLike {
        /// Whether the current user likes it.
        by_me: bool,
        /// Total likes.
        count: u64,
        /// Target post.
        post: Post,
    },
    /// Relative like change of a post.
    ModifyLikeCount {
        /// +1 / -1.
        delta: i64,
        /// Target post.
        post: Post,
    },
    /// Append one comment to a post.
    AddComment {
        /// New comment.
        comment: Comment,
        /// Target post.
        post: Post,
    },
    /// Bulk comment list from the server.
    ReceiveReaction(Vec<Comment>),

    // ── Activity ───────────────────────────────────────────
    /// Replace one activity list.
    SetListOfType {
        /// Posts in list order.
        posts: Vec<Post>,
        /// Which list.
        list: ActivityList,
    },

    // ── Squad ──────────────────────────────────────────────
    /// Landing route spec such as `user:42_comments`.
    SetSquadParams(Option<String>),
    /// Open or close the widget.
    SetWidgetState(bool),

    // ── Notifications ──────────────────────────────────────
    /// One live-pushed notification (shows a banner).
    AddNotification(Notification),
    /// Bulk notifications (remote list or cache hydration).
    ReceiveNotifications {
        /// Incoming notifications, newest first.
        notifications: Vec<Notification>,
        /// Timestamp to persist; `None` stamps the current time.
        ts: Option<i64>,
    },
    /// Acknowledge one notification.
    ViewNotification(NotificationId),
    /// Acknowledge every notification.
    ViewAllNotifications,
    /// Hide the banner of one notification.
    HideBanner(NotificationId),

    // ── Feed ───────────────────────────────────────────────
    /// Queue one feed item.
    AddFeedItem(FeedItem),
    /// The server stored a feed item; carries its `itemId` and `guid`.
    FeedItemLoaded(FeedItem),
}

impl Mutation {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetConnected(_) => "socket/setConnected",
            Self::SetSocketAuth(_) => "socket/setSocketAuth",
            Self::SetPending(_) => "socket/setPending",
            Self::SetSocket(_) => "socket/setSocket",
            Self::SetMerchant(_) => "merchant/setMerchant",
            Self::SetMe(_) => "user/setMe",
            Self::SetOther(_) => "user/setOther",
            Self::UpsertPosts(_) => "post/upsertPosts",
            Self::SetPostLike { .. } => "post/setPostLike",
            Self::ModifyLikeCount { .. } => "post/modifyLikeCount",
            Self::AddComment { .. } => "post/addComment",
            Self::ReceiveReaction(_) => "post/receiveReaction",
            Self::SetListOfType { .. } => "activity/setListOfType",
            Self::SetSquadParams(_) => "squad/setSquadParams",
            Self::SetWidgetState(_) => "squad/setWidgetState",
            Self::AddNotification(_) => "notification/add",
            Self::ReceiveNotifications { .. } => "notification/receive",
            Self::ViewNotification(_) => "notification/view",
            Self::ViewAllNotifications => "notification/viewAll",
            Self::HideBanner(_) => "notification/hideBanner",
            Self::AddFeedItem(_) => "feed/addItem",
            Self::FeedItemLoaded(_) => "feed/itemLoaded",
        }
    }
}
