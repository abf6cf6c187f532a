mod chat;
mod connection;
mod envelope;
mod ice;
mod room;
mod signaling;

pub use chat::ChatMessage;
pub use connection::ConnectionId;
pub use envelope::{Envelope, Membership};
pub use ice::{IceCandidate, IceServerConfig};
pub use room::{RoomId, SenderId};
pub use signaling::{SignalMessage, SignalPayload};
