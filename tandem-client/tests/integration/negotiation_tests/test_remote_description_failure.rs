use crate::integration::init_tracing;
use crate::utils::{LOCAL, MockPeer, PeerCall, remote_ice, remote_offer, session};
use tandem_client::{NegotiationError, SessionEvent, SessionState};

#[tokio::test]
async fn test_first_remote_description_failure_is_fatal() {
    init_tracing();
    let peer = MockPeer::new(LOCAL);
    peer.reject_remote("garbage");
    let mut session = session(&peer);
    session.handle(SessionEvent::Remote(remote_ice(1))).await.unwrap();

    let err = session
        .handle(SessionEvent::Remote(remote_offer("garbage")))
        .await
        .unwrap_err();

    assert!(matches!(err, NegotiationError::RemoteDescriptionRejected(_)));
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(peer.calls().last(), Some(&PeerCall::Close));
    assert!(peer.applied_candidates().is_empty());
}

#[tokio::test]
async fn test_later_remote_description_failure_is_skipped() {
    let peer = MockPeer::new(LOCAL);
    peer.reject_remote("bad renegotiation");
    let mut session = session(&peer);
    session
        .handle(SessionEvent::Remote(remote_offer("good")))
        .await
        .unwrap();

    let out = session
        .handle(SessionEvent::Remote(remote_offer("bad renegotiation")))
        .await
        .unwrap();

    assert!(out.is_none());
    assert_eq!(session.state(), SessionState::Connected);
    assert_eq!(peer.count(|c| *c == PeerCall::Close), 0);
}
