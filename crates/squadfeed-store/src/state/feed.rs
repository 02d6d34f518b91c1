//! Items shared from the host page, waiting for a server id.

use squadfeed_entity::feed::FeedItem;

/// Pending and acknowledged feed items.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    /// Items in share order.
    pub items: Vec<FeedItem>,
}

impl FeedState {
    /// Attach the server `guid` to the item with the same `itemId`.
    ///
    /// The item may have been removed before the server answered; that is
    /// not an error.
    pub fn item_loaded(&mut self, loaded: &FeedItem) {
        let Some(item_id) = loaded.item_id.as_ref() else {
            return;
        };
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.item_id.as_ref() == Some(item_id))
        {
            item.guid = loaded.guid.clone();
        }
    }
}
