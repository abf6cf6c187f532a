use crate::model::room::{RoomId, SenderId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored chat record. `ts` sorts lexicographically in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub room_id: RoomId,
    pub ts: String,
    pub message_id: Uuid,
    pub sender_id: SenderId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ChatMessage {
    pub fn text(room_id: RoomId, sender_id: SenderId, text: String, sent_at_ms: u64) -> Self {
        let message_id = Uuid::now_v7();
        Self {
            room_id,
            ts: format!("{sent_at_ms:013}#{message_id}"),
            message_id,
            sender_id,
            text,
            kind: "text".to_owned(),
        }
    }
}
