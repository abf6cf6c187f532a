use crate::error::TransportError;
use crate::media::{LocalTrack, MediaKind};
use async_trait::async_trait;
use tandem_core::IceCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdpKind {
    Offer,
    Answer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescription {
    pub kind: SdpKind,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpKind::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpKind::Answer,
            sdp: sdp.into(),
        }
    }
}

/// The peer-connection operations a negotiation needs.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    /// Attaches a local track as a new outgoing sender.
    async fn add_track(&self, track: &LocalTrack) -> Result<(), TransportError>;

    /// Declares the intent to receive `kind` without sending it.
    async fn add_receive_only(&self, kind: MediaKind) -> Result<(), TransportError>;

    /// Creates an offer and returns its SDP. The offer stays pending until an
    /// answer is applied or it is rolled back.
    async fn create_offer(&self) -> Result<String, TransportError>;

    /// Creates an answer, installs it as the local description and returns its SDP.
    async fn create_answer(&self) -> Result<String, TransportError>;

    /// Fails for an offer while a local offer is pending.
    async fn set_remote_description(&self, desc: SessionDescription)
    -> Result<(), TransportError>;

    /// Withdraws the pending local offer so a remote offer can be applied.
    async fn rollback(&self) -> Result<(), TransportError>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), TransportError>;

    /// Swaps the track of the outgoing sender of `kind` in place.
    ///
    /// Returns `false` when no sender of that kind exists.
    async fn replace_track(&self, kind: MediaKind, track: &LocalTrack)
    -> Result<bool, TransportError>;

    async fn close(&self) -> Result<(), TransportError>;
}
