//! Inbound message type definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use squadfeed_core::types::PostId;
use squadfeed_entity::post::Comment;
use squadfeed_entity::user::User;

/// Absolute like state carried by a `like` message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    /// Whether the current user likes the post.
    #[serde(default)]
    pub by_me: bool,
    /// Total likes.
    #[serde(default)]
    pub count: u64,
}

/// Messages pushed by the server, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InboundMessage {
    /// The server asks for the credential.
    AuthRequest,
    /// The credential was accepted.
    AuthOk,
    /// Keepalive; answered with `pong`.
    Ping,
    /// A full post. The payload holds every field except `type`.
    SingleItemPost {
        /// Post fields.
        #[serde(flatten)]
        payload: Map<String, Value>,
    },
    /// Absolute like state of a post.
    Like {
        /// Target post.
        guid: PostId,
        /// New state.
        #[serde(default)]
        likes: LikeState,
    },
    /// Someone liked or unliked a post.
    NotifLike {
        /// Target post.
        post_id: PostId,
        /// `true` for a like, `false` for an unlike.
        #[serde(default)]
        i_like: bool,
    },
    /// Someone commented on a post.
    NotifComment {
        /// Target post.
        post_id: PostId,
        /// Comment body.
        #[serde(default)]
        text: String,
        /// Comment author.
        #[serde(default)]
        user: User,
    },
    /// Bulk comments.
    Comments {
        /// Comments, each naming its post.
        #[serde(default)]
        comments: Vec<Comment>,
    },
    /// A user profile, own or other.
    UserProfile {
        /// The profile.
        user: User,
    },
    /// The wishlist activity list.
    Wishlist {
        /// Post ids or post-like objects.
        #[serde(default)]
        wishlist: Vec<Value>,
    },
    /// The blog activity list.
    Blog {
        /// Post ids or post-like objects.
        #[serde(default)]
        blog: Vec<Value>,
    },
    /// The squadders activity list.
    Squadders {
        /// Post ids or post-like objects.
        #[serde(default)]
        squadders: Vec<Value>,
    },
    /// Any discriminant this client does not handle.
    #[serde(other)]
    Unknown,
}

impl InboundMessage {
    /// Discriminant as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthRequest => "authRequest",
            Self::AuthOk => "authOk",
            Self::Ping => "ping",
            Self::SingleItemPost { .. } => "singleItemPost",
            Self::Like { .. } => "like",
            Self::NotifLike { .. } => "notifLike",
            Self::NotifComment { .. } => "notifComment",
            Self::Comments { .. } => "comments",
            Self::UserProfile { .. } => "userProfile",
            Self::Wishlist { .. } => "wishlist",
            Self::Blog { .. } => "blog",
            Self::Squadders { .. } => "squadders",
            Self::Unknown => "unknown",
        }
    }
}
