use serde::Deserialize;
use serde_json::Value;
use tandem_core::{Membership, RoomId};

/// Relay-side view of a client frame.
///
/// Signal payloads stay untyped: the relay only needs their `roomId` and
/// forwards the original text, so SDP and candidate content are never inspected.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum InboundFrame {
    Join(Membership),
    Leave(Membership),
    Signal(Value),
}

/// Room id of a signal payload; missing, non-string or empty ids yield `None`.
pub fn signal_room_id(payload: &Value) -> Option<RoomId> {
    payload
        .get("roomId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(RoomId::from)
}
