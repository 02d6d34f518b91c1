//! Materialized posts.

use std::collections::HashMap;

use tracing::warn;

use squadfeed_core::types::PostId;
use squadfeed_entity::post::{Comment, Post};

/// Posts by id, remembering first-seen order.
#[derive(Debug, Clone, Default)]
pub struct PostState {
    by_id: HashMap<PostId, Post>,
    order: Vec<PostId>,
}

impl PostState {
    /// Insert or replace a post. Posts without an id are not stored.
    pub fn upsert(&mut self, post: Post) {
        let Some(id) = post.id().cloned() else {
            warn!("Skipping post without guid");
            return;
        };
        if self.by_id.insert(id.clone(), post).is_none() {
            self.order.push(id);
        }
    }

    /// A post by id.
    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.by_id.get(id)
    }

    /// All posts in first-seen order.
    pub fn all(&self) -> Vec<Post> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .cloned()
            .collect()
    }

    /// Number of stored posts.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether no post is stored.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn target_mut(&mut self, post: &Post) -> Option<&mut Post> {
        post.id().and_then(|id| self.by_id.get_mut(id))
    }

    /// Absolute like state from the server.
    pub fn set_like(&mut self, post: &Post, by_me: bool, count: u64) {
        if let Some(target) = self.target_mut(post) {
            target.likes.by_me = by_me;
            target.likes.count = count;
        }
    }

    /// Relative like change.
    pub fn modify_like(&mut self, post: &Post, delta: i64) {
        if let Some(target) = self.target_mut(post) {
            target.likes.apply_delta(delta);
        }
    }

    /// Append a comment and bump the count.
    pub fn add_comment(&mut self, post: &Post, comment: Comment) {
        if let Some(target) = self.target_mut(post) {
            target.comments.messages.push(comment);
            target.comments.count += 1;
        }
    }

    /// Replace loaded comments for each post named by the bulk list.
    pub fn receive_reaction(&mut self, comments: &[Comment]) {
        let mut grouped: HashMap<&PostId, Vec<Comment>> = HashMap::new();
        for comment in comments {
            match comment.post_id.as_ref() {
                Some(id) => grouped.entry(id).or_default().push(comment.clone()),
                None => warn!("Skipping comment without postId"),
            }
        }
        for (id, messages) in grouped {
            if let Some(target) = self.by_id.get_mut(id) {
                target.comments.count = target.comments.count.max(messages.len() as u64);
                target.comments.messages = messages;
            }
        }
    }
}
