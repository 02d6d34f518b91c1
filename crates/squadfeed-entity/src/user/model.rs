//! User profile model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use squadfeed_core::types::UserId;

/// A user profile as pushed by the server (`userProfile`) or embedded in
/// posts and comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Profile id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Alternate id used inside post authors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<UserId>,
    /// Display name.
    #[serde(default)]
    pub screen_name: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: String,
    /// Remaining profile fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Best available id: `userId`, else `guid`.
    pub fn id(&self) -> Option<&UserId> {
        self.user_id.as_ref().or(self.guid.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let raw = serde_json::json!({ "userId": "u1", "screenName": "ann", "bio": "hi" });
        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.id(), Some(&UserId::from("u1")));
        assert_eq!(user.extra.get("bio"), Some(&Value::from("hi")));
        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["bio"], raw["bio"]);
    }

    #[test]
    fn test_id_falls_back_to_guid() {
        let user: User = serde_json::from_value(serde_json::json!({ "guid": "g7" })).unwrap();
        assert_eq!(user.id(), Some(&UserId::from("g7")));
    }
}
