use axum::extract::ws::Message;
use std::collections::HashMap;
use tandem_core::{ConnectionId, SenderId};
use tokio::sync::mpsc;

/// Outbound queue of one websocket connection, drained in order by its writer task.
pub type Outbound = mpsc::UnboundedSender<Message>;

#[derive(Clone)]
pub(crate) struct Member {
    pub(crate) sender_id: SenderId,
    pub(crate) tx: Outbound,
}

/// Connections currently bound to one room id.
#[derive(Default)]
pub struct Room {
    pub(crate) members: HashMap<ConnectionId, Member>,
}

impl Room {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members.contains_key(connection_id)
    }

    pub fn sender_ids(&self) -> Vec<SenderId> {
        self.members.values().map(|m| m.sender_id.clone()).collect()
    }
}
