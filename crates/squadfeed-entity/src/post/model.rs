//! Feed post model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use squadfeed_core::types::{ItemId, PostId, UserId};

use super::comment::Comments;
use super::item::CatalogItem;
use crate::user::User;

/// Sort key for posts without a server timestamp, keeping them on top.
pub const ALWAYS_ON_TOP_TS: i64 = 9_007_199_254_740_991;

/// Fields removed by [`Post::to_message`] before a post is sent upstream.
const CLIENT_ONLY_FIELDS: [&str; 7] = ["byMe", "comments", "error", "likes", "ts", "user", "userId"];

/// Post layout.
///
/// Layouts this client does not render are carried as [`PostKind::Other`]
/// with their wire name, so the post still round-trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostKind {
    /// One item.
    #[default]
    SingleItemPost,
    /// Two items to vote between.
    PollPost,
    /// A set of items worn together.
    OutfitPost,
    /// Any other layout, by wire name.
    Other(String),
}

impl PostKind {
    /// Wire name of the layout.
    pub fn as_str(&self) -> &str {
        match self {
            Self::SingleItemPost => "singleItemPost",
            Self::PollPost => "pollPost",
            Self::OutfitPost => "outfitPost",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for PostKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "singleItemPost" => Self::SingleItemPost,
            "pollPost" => Self::PollPost,
            "outfitPost" => Self::OutfitPost,
            _ => Self::Other(name),
        }
    }
}

impl From<PostKind> for String {
    fn from(kind: PostKind) -> Self {
        match kind {
            PostKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Like summary held on a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Likes {
    /// Whether the current user likes the post.
    #[serde(default)]
    pub by_me: bool,
    /// Total likes.
    #[serde(default)]
    pub count: u64,
    /// Users who liked, as sent by the server.
    #[serde(default)]
    pub users: Vec<Value>,
}

impl Likes {
    /// Apply a +1/-1 style delta without going below zero.
    pub fn apply_delta(&mut self, delta: i64) {
        self.count = self.count.saturating_add_signed(delta);
    }
}

/// A feed post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Layout discriminant (`type` on the wire).
    #[serde(rename = "type", default)]
    pub kind: PostKind,
    /// Like summary.
    #[serde(default)]
    pub likes: Likes,
    /// Comment summary.
    #[serde(default)]
    pub comments: Comments,
    /// Whether the current user authored the post.
    #[serde(default)]
    pub by_me: bool,
    /// Author.
    #[serde(default)]
    pub user: User,
    /// Author id.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Last server-side error for this post.
    #[serde(default)]
    pub error: Option<Value>,
    /// Post id.
    #[serde(default)]
    pub guid: Option<PostId>,
    /// Mirror of `guid` kept for the server.
    #[serde(default)]
    pub post_id: Option<PostId>,
    /// Visibility flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// Caption.
    #[serde(default)]
    pub text: String,
    /// Sort timestamp.
    #[serde(default = "always_on_top")]
    pub ts: i64,
    /// Client correlation id for posts not yet acknowledged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// Creation time in epoch millis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_ts: Option<i64>,
    /// Single-item layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<CatalogItem>,
    /// Poll option one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item1: Option<CatalogItem>,
    /// Poll option two.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item2: Option<CatalogItem>,
    /// Outfit items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<CatalogItem>>,
    /// Poll: whether the current user voted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voted: Option<bool>,
    /// Poll: expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<Value>,
    /// Poll: closed for voting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    /// Outfit: price of all items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    /// Remaining post fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn always_on_top() -> i64 {
    ALWAYS_ON_TOP_TS
}

impl Default for Post {
    fn default() -> Self {
        Self {
            kind: PostKind::default(),
            likes: Likes::default(),
            comments: Comments::default(),
            by_me: false,
            user: User::default(),
            user_id: None,
            error: None,
            guid: None,
            post_id: None,
            private: None,
            text: String::new(),
            ts: ALWAYS_ON_TOP_TS,
            correlation_id: None,
            creation_ts: None,
            item: None,
            item1: None,
            item2: None,
            items: None,
            voted: None,
            expires: None,
            closed: None,
            total_price: None,
            extra: Map::new(),
        }
    }
}

impl Post {
    /// Parse a wire post and apply layout defaults.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let post: Self = serde_json::from_value(value)?;
        Ok(post.normalized())
    }

    /// Apply id and layout defaults.
    ///
    /// `postId` wins over `guid`, the author id falls back to the embedded
    /// user's guid, and only the item fields of the post's own layout are
    /// kept, defaulted to placeholder items. Unknown layouts keep their
    /// fields untouched.
    pub fn normalized(mut self) -> Self {
        self.user_id = self.user_id.take().or_else(|| self.user.guid.clone());
        self.guid = self.post_id.take().or_else(|| self.guid.take());
        self.post_id = self.guid.clone();

        match &self.kind {
            PostKind::PollPost => {
                self.item1.get_or_insert_with(CatalogItem::default);
                self.item2.get_or_insert_with(CatalogItem::default);
                self.voted.get_or_insert(false);
                self.closed.get_or_insert(false);
                self.item = None;
                self.items = None;
                self.total_price = None;
            }
            PostKind::OutfitPost => {
                self.items
                    .get_or_insert_with(|| vec![CatalogItem::default(), CatalogItem::default()]);
                self.total_price.get_or_insert(0.0);
                self.item = None;
                self.item1 = None;
                self.item2 = None;
                self.voted = None;
                self.expires = None;
                self.closed = None;
            }
            PostKind::SingleItemPost => {
                self.item.get_or_insert_with(CatalogItem::default);
                self.item1 = None;
                self.item2 = None;
                self.items = None;
                self.voted = None;
                self.expires = None;
                self.closed = None;
                self.total_price = None;
            }
            PostKind::Other(_) => {}
        }
        self
    }

    /// Placeholder for a post known only by id.
    pub fn stub(id: PostId) -> Self {
        Self {
            guid: Some(id.clone()),
            post_id: Some(id),
            ..Self::default()
        }
    }

    /// The post id (`guid`).
    pub fn id(&self) -> Option<&PostId> {
        self.guid.as_ref()
    }

    /// Find an item of this post by id, whatever the layout.
    pub fn get_item(&self, id: &ItemId) -> Option<&CatalogItem> {
        [self.item.as_ref(), self.item1.as_ref(), self.item2.as_ref()]
            .into_iter()
            .flatten()
            .find(|item| item.has_id(id))
            .or_else(|| self.items.iter().flatten().find(|item| item.has_id(id)))
    }

    /// Wire form for sending the post upstream, without client-only fields.
    pub fn to_message(&self) -> Result<Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            for field in CLIENT_ONLY_FIELDS {
                map.remove(field);
            }
        }
        Ok(value)
    }

    /// Merge a fresher copy of this post from the server.
    ///
    /// Every field present in `fresh` overwrites ours except `comments`,
    /// where only the count is taken so locally loaded messages survive.
    pub fn update(&mut self, fresh: &Value) -> Result<(), serde_json::Error> {
        let Value::Object(fresh) = fresh else {
            return Ok(());
        };

        let mut merged = match serde_json::to_value(&*self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in fresh {
            if key != "comments" {
                merged.insert(key.clone(), value.clone());
            }
        }

        let messages = std::mem::take(&mut self.comments.messages);
        let mut updated: Self = serde_json::from_value(Value::Object(merged))?;
        updated.comments.messages = messages;
        if let Some(count) = fresh
            .get("comments")
            .and_then(|c| c.get("count"))
            .and_then(Value::as_u64)
        {
            updated.comments.count = count;
        }
        updated.post_id = updated.guid.clone();

        *self = updated;
        Ok(())
    }

    /// Forget the client correlation id once the server acknowledged the post.
    pub fn unset_correlation_id(&mut self) {
        self.correlation_id = None;
    }
}
