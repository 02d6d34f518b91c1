//! Post comments.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use squadfeed_core::types::PostId;

use crate::user::User;

/// One comment on a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment body.
    #[serde(default)]
    pub text: String,
    /// Who wrote it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// Post the comment belongs to, when sent in bulk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
    /// Remaining comment fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Comment {
    /// A comment authored by `author`.
    pub fn new(text: impl Into<String>, author: User) -> Self {
        Self {
            text: text.into(),
            author: Some(author),
            ..Self::default()
        }
    }
}

/// Comment summary held on a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comments {
    /// Server-side comment count.
    #[serde(default)]
    pub count: u64,
    /// Comments loaded on the client.
    #[serde(default)]
    pub messages: Vec<Comment>,
}
