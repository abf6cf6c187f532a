use crate::room::room::{Member, Outbound, Room};
use axum::extract::ws::{Message, Utf8Bytes};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tandem_core::{ConnectionId, RoomId, SenderId};
use tracing::{debug, info, warn};

struct Binding {
    room_id: RoomId,
    sender_id: SenderId,
}

struct Connection {
    tx: Outbound,
    binding: Option<Binding>,
}

struct RegistryInner {
    rooms: DashMap<RoomId, Room>,
    connections: DashMap<ConnectionId, Connection>,
}

/// Maps room ids to their live member connections.
///
/// Every membership change and every forward into a room happens under that
/// room's map entry lock, so a frame is never delivered to a connection that
/// has already left.
#[derive(Clone)]
pub struct RoomRegistry {
    inner: Arc<RegistryInner>,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                rooms: DashMap::new(),
                connections: DashMap::new(),
            }),
        }
    }

    /// Registers a freshly accepted transport connection, not yet bound to any room.
    pub fn connect(&self, connection_id: ConnectionId, tx: Outbound) {
        self.inner.connections.insert(
            connection_id,
            Connection {
                tx,
                binding: None,
            },
        );
    }

    /// Binds the connection to `room_id`, leaving its previous room first.
    ///
    /// Returns `false` when the connection is unknown (already disconnected).
    pub fn join(&self, connection_id: ConnectionId, room_id: RoomId, sender_id: SenderId) -> bool {
        let (tx, previous) = {
            let Some(mut conn) = self.inner.connections.get_mut(&connection_id) else {
                warn!("Join from unknown connection {}", connection_id);
                return false;
            };
            let previous = conn.binding.replace(Binding {
                room_id: room_id.clone(),
                sender_id: sender_id.clone(),
            });
            (conn.tx.clone(), previous)
        };

        if let Some(previous) = previous {
            self.remove_member(&previous.room_id, connection_id);
        }

        let mut room = self.inner.rooms.entry(room_id.clone()).or_default();
        room.members.insert(connection_id, Member { sender_id: sender_id.clone(), tx });

        info!(
            "{} ({}) joined room '{}' ({} member(s))",
            sender_id,
            connection_id,
            room_id,
            room.len()
        );
        true
    }

    /// Unbinds the connection from its current room. No-op when unbound.
    pub fn leave(&self, connection_id: ConnectionId) -> Option<RoomId> {
        let binding = self
            .inner
            .connections
            .get_mut(&connection_id)
            .and_then(|mut conn| conn.binding.take())?;

        self.remove_member(&binding.room_id, connection_id);
        info!(
            "{} ({}) left room '{}'",
            binding.sender_id, connection_id, binding.room_id
        );
        Some(binding.room_id)
    }

    /// Delivers `frame` unchanged to every member of `room_id` except `from`.
    ///
    /// Returns the number of connections the frame was queued on. A room with
    /// no other member drops the frame.
    pub fn forward(&self, from: ConnectionId, room_id: &RoomId, frame: &Utf8Bytes) -> usize {
        let Some(room) = self.inner.rooms.get(room_id) else {
            debug!("Dropping frame for empty room '{}'", room_id);
            return 0;
        };

        let mut delivered = 0;
        for (member_id, member) in room.members.iter() {
            if *member_id == from {
                continue;
            }
            match member.tx.send(Message::Text(frame.clone())) {
                Ok(()) => delivered += 1,
                Err(_) => warn!("Outbound queue of {} is closed", member_id),
            }
        }

        if delivered == 0 {
            debug!("No other member in room '{}', frame dropped", room_id);
        }
        delivered
    }

    /// Leaves the current room and releases the connection.
    pub fn disconnect(&self, connection_id: ConnectionId) {
        self.leave(connection_id);
        self.inner.connections.remove(&connection_id);
    }

    pub fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        self.inner
            .connections
            .get(connection_id)
            .and_then(|conn| conn.binding.as_ref().map(|b| b.room_id.clone()))
    }

    pub fn members(&self, room_id: &RoomId) -> Vec<SenderId> {
        self.inner
            .rooms
            .get(room_id)
            .map(|room| room.sender_ids())
            .unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.inner.rooms.len()
    }

    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    fn remove_member(&self, room_id: &RoomId, connection_id: ConnectionId) {
        if let Entry::Occupied(mut entry) = self.inner.rooms.entry(room_id.clone()) {
            entry.get_mut().members.remove(&connection_id);
            if entry.get().is_empty() {
                entry.remove();
                debug!("Room '{}' is empty, destroyed", room_id);
            }
        }
    }
}
