//! Per-user activity lists (wishlist, blog, squadders).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The activity lists the server can push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityList {
    /// Items the user wants.
    Wishlist,
    /// The user's own posts.
    Blog,
    /// Posts from the user's squad.
    Squadders,
}

impl ActivityList {
    /// Wire name, identical to the message discriminant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wishlist => "wishlist",
            Self::Blog => "blog",
            Self::Squadders => "squadders",
        }
    }
}

impl fmt::Display for ActivityList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
