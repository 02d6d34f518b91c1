//! Activity lists by type.

use std::collections::BTreeMap;

use squadfeed_core::types::PostId;
use squadfeed_entity::activity::ActivityList;
use squadfeed_entity::post::Post;

/// Post ids per activity list, in server order.
#[derive(Debug, Clone, Default)]
pub struct ActivityState {
    lists: BTreeMap<ActivityList, Vec<PostId>>,
}

impl ActivityState {
    /// Replace a list. Posts without an id cannot be referenced and are skipped.
    pub fn set_list(&mut self, list: ActivityList, posts: &[Post]) {
        let ids = posts.iter().filter_map(|p| p.id().cloned()).collect();
        self.lists.insert(list, ids);
    }

    /// Ids of one list; empty when never received.
    pub fn list(&self, list: ActivityList) -> &[PostId] {
        self.lists.get(&list).map(Vec::as_slice).unwrap_or_default()
    }
}
