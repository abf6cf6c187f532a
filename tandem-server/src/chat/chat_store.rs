use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tandem_core::{ChatMessage, RoomId, SenderId};

/// Append/query store for room chat history.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Stores a text message and returns the record with its sortable `ts` key.
    async fn append(&self, room_id: RoomId, sender_id: SenderId, text: String)
    -> Result<ChatMessage>;

    /// Up to `limit` records of the room, oldest first.
    async fn history(&self, room_id: &RoomId, limit: usize) -> Result<Vec<ChatMessage>>;
}

/// Process-local history; lost on restart.
#[derive(Default)]
pub struct InMemoryChatStore {
    rooms: DashMap<RoomId, Vec<ChatMessage>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn append(
        &self,
        room_id: RoomId,
        sender_id: SenderId,
        text: String,
    ) -> Result<ChatMessage> {
        let sent_at_ms = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let mut history = self.rooms.entry(room_id.clone()).or_default();
        let message = ChatMessage::text(room_id, sender_id, text, sent_at_ms);
        history.push(message.clone());
        Ok(message)
    }

    async fn history(&self, room_id: &RoomId, limit: usize) -> Result<Vec<ChatMessage>> {
        Ok(self
            .rooms
            .get(room_id)
            .map(|history| history.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
