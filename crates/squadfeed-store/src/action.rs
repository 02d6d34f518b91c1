//! Asynchronous store workflows.

use serde_json::Value;

use squadfeed_entity::feed::{FeedItem, FeedItemEnvelope};
use squadfeed_entity::post::Post;

/// Workflows run by [`Store::dispatch`](crate::Store::dispatch).
#[derive(Debug, Clone)]
pub enum Action {
    /// A single post pushed by the server, as the full wire message.
    ReceiveItem(Value),
    /// Several posts to materialize before something references them.
    ReceiveBulk(Vec<Post>),
    /// Like counter change from a like notification.
    ModifyLike {
        /// +1 when liked, -1 when unliked.
        delta: i64,
        /// Target post.
        post: Post,
    },
    /// Queue a shared feed item and forward it while connected.
    SaveFeedItem(FeedItemEnvelope),
    /// The server acknowledged a feed item.
    ReceiveFeedItem(FeedItem),
}

impl Action {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReceiveItem(_) => "post/receiveItem",
            Self::ReceiveBulk(_) => "post/receiveBulk",
            Self::ModifyLike { .. } => "post/modifyLike",
            Self::SaveFeedItem(_) => "feed/saveItem",
            Self::ReceiveFeedItem(_) => "feed/receiveItem",
        }
    }
}
