use crate::model::room::{RoomId, SenderId};
use crate::model::signaling::SignalMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub room_id: RoomId,
    pub sender_id: SenderId,
}

/// Event-typed frame carried on the signaling websocket:
/// `{"event": "join" | "leave" | "signal", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum Envelope {
    Join(Membership),
    Leave(Membership),
    Signal(SignalMessage),
}
