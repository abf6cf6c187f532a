use crate::utils::{LOCAL, MockPeer, ROOM, candidate, session};
use tandem_client::{SessionEvent, SessionState};
use tandem_core::{SignalMessage, SignalPayload};

#[tokio::test]
async fn test_other_rooms_are_ignored() {
    let peer = MockPeer::new(LOCAL);
    let mut session = session(&peer);
    let foreign = SignalMessage::new(
        "r2".into(),
        "B".into(),
        SignalPayload::Offer { sdp: "v=0".into() },
    );

    let out = session.handle(SessionEvent::Remote(foreign)).await.unwrap();

    assert!(out.is_none());
    assert_eq!(session.state(), SessionState::Idle);
    assert!(peer.calls().is_empty());
}

#[tokio::test]
async fn test_own_messages_are_ignored() {
    let peer = MockPeer::new(LOCAL);
    let mut session = session(&peer);
    let echo = SignalMessage::new(
        ROOM.into(),
        LOCAL.into(),
        SignalPayload::Ice {
            candidate: candidate(1),
        },
    );

    session.handle(SessionEvent::Remote(echo)).await.unwrap();

    assert!(session.candidates().is_empty());
}
