use crate::room::{Outbound, RoomRegistry};
use crate::signaling::inbound_frame::{InboundFrame, signal_room_id};
use axum::extract::ws::Utf8Bytes;
use tandem_core::ConnectionId;
use tracing::{debug, warn};

/// Pass-through multiplexer: binds connections to rooms and forwards signal
/// frames, verbatim, to the other members of the frame's room.
#[derive(Clone, Default)]
pub struct SignalingService {
    registry: RoomRegistry,
}

impl SignalingService {
    pub fn new() -> Self {
        Self {
            registry: RoomRegistry::new(),
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn add_peer(&self, connection_id: ConnectionId, tx: Outbound) {
        self.registry.connect(connection_id, tx);
    }

    pub fn remove_peer(&self, connection_id: ConnectionId) {
        self.registry.disconnect(connection_id);
    }

    /// Handles one text frame from `connection_id`. Frames of one connection
    /// must be fed here in arrival order.
    pub fn handle_frame(&self, connection_id: ConnectionId, text: Utf8Bytes) {
        let frame = match serde_json::from_str::<InboundFrame>(text.as_str()) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Invalid frame from {}: {}", connection_id, e);
                return;
            }
        };

        match frame {
            InboundFrame::Join(membership) => {
                self.registry
                    .join(connection_id, membership.room_id, membership.sender_id);
            }
            InboundFrame::Leave(membership) => {
                match self.registry.leave(connection_id) {
                    Some(room_id) if room_id != membership.room_id => debug!(
                        "{} asked to leave '{}' but was bound to '{}'",
                        connection_id, membership.room_id, room_id
                    ),
                    Some(_) => {}
                    None => debug!("Leave from unbound connection {}", connection_id),
                }
            }
            InboundFrame::Signal(payload) => {
                let Some(room_id) = signal_room_id(&payload) else {
                    warn!("Signal without roomId from {}, dropped", connection_id);
                    return;
                };
                let delivered = self.registry.forward(connection_id, &room_id, &text);
                debug!(
                    "Signal from {} to room '{}' delivered to {} connection(s)",
                    connection_id, room_id, delivered
                );
            }
        }
    }
}
