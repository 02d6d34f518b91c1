//! Notification model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use squadfeed_core::types::NotificationId;

/// A notification shown in the bell menu.
///
/// Identity is `_id`; the client never holds two notifications with the
/// same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notification id.
    #[serde(rename = "_id")]
    pub id: NotificationId,
    /// Whether the user acknowledged it. Missing on the wire means unread.
    #[serde(default)]
    pub viewed: bool,
    /// Whether the transient banner is showing.
    #[serde(default)]
    pub show_banner: bool,
    /// Domain fields (actor, post, text, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Notification {
    /// An unread notification with no domain fields.
    pub fn new(id: impl Into<NotificationId>) -> Self {
        Self {
            id: id.into(),
            viewed: false,
            show_banner: false,
            fields: Map::new(),
        }
    }

    /// Whether the notification still needs the user's attention.
    pub fn is_unread(&self) -> bool {
        !self.viewed
    }
}
