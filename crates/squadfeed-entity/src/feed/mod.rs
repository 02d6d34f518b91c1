//! Items shared into the feed from other windows.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use squadfeed_core::types::{ItemId, PostId};

/// Discriminant of the envelope carrying a shared feed item.
pub const FEED_ITEM_TYPE: &str = "FEED_ITEM";

/// A shop item queued for posting; `guid` is set once the server stored it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Shop item id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    /// Post id assigned by the server.
    #[serde(default)]
    pub guid: Option<PostId>,
    /// Remaining item fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `{type: FEED_ITEM, data}` as posted by the embedding shop page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItemEnvelope {
    /// Always [`FEED_ITEM_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    /// The item.
    pub data: FeedItem,
}

impl FeedItemEnvelope {
    /// Wrap an item.
    pub fn new(data: FeedItem) -> Self {
        Self {
            kind: FEED_ITEM_TYPE.to_string(),
            data,
        }
    }
}
