use crate::model::ice::IceCandidate;
use crate::model::room::{RoomId, SenderId};
use serde::{Deserialize, Serialize};

/// Negotiation message relayed between the two members of a room.
///
/// On the wire: `{roomId, senderId, type, sdp?, candidate?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMessage {
    pub room_id: RoomId,
    pub sender_id: SenderId,
    #[serde(flatten)]
    pub payload: SignalPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SignalPayload {
    Offer { sdp: String },
    Answer { sdp: String },
    Ice { candidate: IceCandidate },
}

impl SignalPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            SignalPayload::Offer { .. } => "offer",
            SignalPayload::Answer { .. } => "answer",
            SignalPayload::Ice { .. } => "ice",
        }
    }
}

impl SignalMessage {
    pub fn new(room_id: RoomId, sender_id: SenderId, payload: SignalPayload) -> Self {
        Self {
            room_id,
            sender_id,
            payload,
        }
    }
}
