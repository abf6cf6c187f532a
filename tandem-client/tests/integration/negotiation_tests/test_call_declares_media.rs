use crate::integration::init_tracing;
use crate::utils::{LOCAL, MockPeer, PeerCall, ROOM, session};
use tandem_client::{
    LocalSource, LocalTrack, MediaKind, Role, SdpKind, SessionEvent, SessionState, SourceKind,
};
use tandem_core::SignalPayload;

#[tokio::test]
async fn test_call_without_media_receives_only() {
    init_tracing();
    let peer = MockPeer::new(LOCAL);
    let mut session = session(&peer);

    let offer = session.handle(SessionEvent::Call).await.unwrap().unwrap();

    assert_eq!(offer.room_id.as_str(), ROOM);
    assert_eq!(offer.sender_id.as_str(), LOCAL);
    assert_eq!(
        offer.payload,
        SignalPayload::Offer {
            sdp: MockPeer::offer_sdp(LOCAL, 1)
        }
    );
    assert_eq!(session.state(), SessionState::Negotiating(Role::Offering));
    assert_eq!(
        peer.calls(),
        vec![
            PeerCall::AddReceiveOnly(MediaKind::Video),
            PeerCall::AddReceiveOnly(MediaKind::Audio),
            PeerCall::CreateOffer,
        ]
    );
}

#[tokio::test]
async fn test_call_attaches_local_tracks() {
    let peer = MockPeer::new(LOCAL);
    let mut session = session(&peer);
    let source = LocalSource::from_tracks(
        SourceKind::Camera,
        vec![
            LocalTrack::new(MediaKind::Video, "cam", "local"),
            LocalTrack::new(MediaKind::Audio, "mic", "local"),
        ],
    )
    .unwrap();
    session.use_local_source(Some(&source));

    session.handle(SessionEvent::Call).await.unwrap();

    assert_eq!(
        peer.calls(),
        vec![
            PeerCall::AddTrack(MediaKind::Video, "cam".to_owned()),
            PeerCall::AddTrack(MediaKind::Audio, "mic".to_owned()),
            PeerCall::CreateOffer,
        ]
    );
    assert!(session.live_peer().is_some());
}

#[tokio::test]
async fn test_second_call_request_is_ignored() {
    let peer = MockPeer::new(LOCAL);
    let mut session = session(&peer);

    session.handle(SessionEvent::Call).await.unwrap();
    let again = session.handle(SessionEvent::Call).await.unwrap();

    assert!(again.is_none());
    assert_eq!(peer.count(|c| *c == PeerCall::CreateOffer), 1);
    assert_eq!(
        peer.count(|c| matches!(c, PeerCall::SetRemote(SdpKind::Offer, _))),
        0
    );
}
