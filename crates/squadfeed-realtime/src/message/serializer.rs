//! JSON framing for WebSocket text frames.

use serde::Deserialize;
use serde_json::Value;

use squadfeed_core::result::AppResult;

use super::types::InboundMessage;

/// Parse a text frame into a JSON envelope.
pub fn parse_frame(text: &str) -> AppResult<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Interpret an envelope as an inbound message.
pub fn deserialize_inbound(envelope: &Value) -> AppResult<InboundMessage> {
    Ok(InboundMessage::deserialize(envelope)?)
}

/// Serialize an outbound envelope for a text frame.
pub fn serialize_outbound(envelope: &Value) -> AppResult<String> {
    Ok(serde_json::to_string(envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_errors_map_to_app_error() {
        let err = parse_frame("{oops").unwrap_err();
        assert_eq!(err.kind, squadfeed_core::error::ErrorKind::Serialization);
    }

    #[test]
    fn test_deserialize_inbound_from_envelope() {
        let value = parse_frame(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(deserialize_inbound(&value).unwrap(), InboundMessage::Ping);
    }
}
