use crate::media::MediaKind;
use tandem_core::IceCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl PeerState {
    /// The connection will not recover on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PeerState::Failed | PeerState::Closed)
    }
}

/// Events raised by the peer connection outside of any call into it.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerEvent {
    CandidateGenerated(IceCandidate),
    StateChanged(PeerState),
    RemoteTrack { kind: MediaKind, track_id: String },
}
