//! Builders for outbound control envelopes.

use serde_json::{Value, json};

/// `{type: pong}`.
pub fn pong() -> Value {
    json!({ "type": "pong" })
}

/// `{type: authResponse, userToken, merchantId}`.
pub fn auth_response(user_token: &str, merchant_id: Option<&str>) -> Value {
    json!({
        "type": "authResponse",
        "userToken": user_token,
        "merchantId": merchant_id,
    })
}

/// `{type: fetchUser}`.
pub fn fetch_user() -> Value {
    json!({ "type": "fetchUser" })
}

/// `{type: fetchNotifications}`.
pub fn fetch_notifications() -> Value {
    json!({ "type": "fetchNotifications" })
}
