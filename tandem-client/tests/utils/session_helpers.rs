use crate::utils::MockPeer;
use std::sync::Arc;
use std::time::Duration;
use tandem_client::NegotiationSession;
use tandem_core::{IceCandidate, SignalMessage, SignalPayload};

pub const ROOM: &str = "r1";
pub const LOCAL: &str = "A";
pub const REMOTE: &str = "B";

pub const EVENT_TIMEOUT_MS: u64 = 2000;
pub const POLL_INTERVAL_MS: u64 = 10;

pub fn session(peer: &Arc<MockPeer>) -> NegotiationSession<MockPeer> {
    NegotiationSession::new(ROOM.into(), LOCAL.into(), Arc::clone(peer))
}

pub fn candidate(n: u8) -> IceCandidate {
    IceCandidate {
        candidate: format!("candidate:{n} 1 UDP 2122252543 10.0.0.{n} 5000{n} typ host"),
        sdp_mid: Some("0".to_owned()),
        sdp_m_line_index: Some(0),
        username_fragment: None,
    }
}

pub fn from_remote(payload: SignalPayload) -> SignalMessage {
    SignalMessage::new(ROOM.into(), REMOTE.into(), payload)
}

pub fn remote_offer(sdp: &str) -> SignalMessage {
    from_remote(SignalPayload::Offer {
        sdp: sdp.to_owned(),
    })
}

pub fn remote_answer(sdp: &str) -> SignalMessage {
    from_remote(SignalPayload::Answer {
        sdp: sdp.to_owned(),
    })
}

pub fn remote_ice(n: u8) -> SignalMessage {
    from_remote(SignalPayload::Ice {
        candidate: candidate(n),
    })
}

/// Polls `condition` until it holds or `timeout_ms` elapses.
pub async fn eventually(timeout_ms: u64, condition: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}
