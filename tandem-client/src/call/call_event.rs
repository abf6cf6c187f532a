use crate::media::LocalTrack;
use crate::transport::PeerEvent;
use tandem_core::SignalMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallCommand {
    StartCamera,
    ShareScreen,
    StartCall,
    HangUp,
}

/// Every input of a call, handled one at a time.
#[derive(Debug)]
pub enum CallEvent {
    Command(CallCommand),
    Signal(SignalMessage),
    Peer(PeerEvent),
    ScreenShareEnded(LocalTrack),
    SignalingClosed,
}
