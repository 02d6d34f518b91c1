//! Catalogue items referenced by posts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use squadfeed_core::types::ItemId;

/// A shop item shown inside a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Item id, absent on placeholder items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    /// Selected variant; empty when none was chosen.
    #[serde(default)]
    pub var_id: String,
    /// Remaining item fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItem {
    /// Whether this item carries the given id.
    pub fn has_id(&self, id: &ItemId) -> bool {
        self.item_id.as_ref() == Some(id)
    }
}
