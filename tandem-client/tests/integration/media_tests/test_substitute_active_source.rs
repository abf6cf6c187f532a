use crate::integration::init_tracing;
use crate::utils::{MockDevices, MockPeer, PeerCall};
use tandem_client::{MediaKind, MediaSourceController, PeerTransport, SourceKind, TrackState};

#[tokio::test]
async fn test_substitution_matches_kinds() {
    init_tracing();
    let peer = MockPeer::new("A");
    let mut media = MediaSourceController::new(MockDevices::new());

    let camera = media.acquire_camera().await.unwrap();
    media
        .substitute_active_source::<MockPeer>(None, camera.clone())
        .await
        .unwrap();
    for track in camera.tracks() {
        peer.add_track(&track).await.unwrap();
    }

    let screen = media.acquire_screen().await.unwrap();
    let outcome = media
        .substitute_active_source(Some(&*peer), screen.clone())
        .await
        .unwrap();

    assert!(outcome.video_replaced);
    assert!(outcome.audio_replaced);
    assert!(!outcome.audio_carried_over);
    assert_eq!(
        peer.sender_track(MediaKind::Video).as_deref(),
        Some(screen.video().id())
    );
    assert_eq!(
        peer.sender_track(MediaKind::Audio).as_deref(),
        Some(screen.audio().unwrap().id())
    );
    // Same senders, no renegotiation.
    assert_eq!(peer.count(|c| matches!(c, PeerCall::AddTrack(..))), 2);
    assert_eq!(peer.count(|c| *c == PeerCall::CreateOffer), 0);

    for track in camera.tracks() {
        assert_eq!(track.state(), TrackState::Stopped);
    }
    assert_eq!(media.active().unwrap().kind(), SourceKind::Screen);
}

#[tokio::test]
async fn test_microphone_is_carried_over_to_silent_screen() {
    let peer = MockPeer::new("A");
    let devices = MockDevices::new();
    let mut media = MediaSourceController::new(devices.clone());

    let camera = media.acquire_camera().await.unwrap();
    media
        .substitute_active_source::<MockPeer>(None, camera.clone())
        .await
        .unwrap();
    for track in camera.tracks() {
        peer.add_track(&track).await.unwrap();
    }
    let mic = camera.audio().unwrap().clone();

    devices.without_system_audio();
    devices.deny_microphone();
    let screen = media.acquire_screen().await.unwrap();
    let outcome = media
        .substitute_active_source(Some(&*peer), screen)
        .await
        .unwrap();

    assert!(outcome.video_replaced);
    assert!(!outcome.audio_replaced);
    assert!(outcome.audio_carried_over);
    assert_eq!(
        peer.count(|c| matches!(c, PeerCall::ReplaceTrack(MediaKind::Audio, _))),
        0
    );

    // The microphone still feeds its sender and belongs to the screen source now.
    assert!(mic.is_live());
    assert_eq!(camera.video().state(), TrackState::Stopped);
    let active = media.active().unwrap();
    assert!(active.audio().unwrap().same_as(&mic));
    assert_eq!(peer.sender_track(MediaKind::Audio).as_deref(), Some(mic.id()));
}

#[tokio::test]
async fn test_receive_only_peer_has_nothing_to_replace() {
    let peer = MockPeer::new("A");
    let mut media = MediaSourceController::new(MockDevices::new());
    let camera = media.acquire_camera().await.unwrap();

    let outcome = media
        .substitute_active_source(Some(&*peer), camera)
        .await
        .unwrap();

    assert!(!outcome.video_replaced);
    assert!(!outcome.audio_replaced);
    assert!(media.active().is_some());
}

#[tokio::test]
async fn test_release_all_stops_tracks() {
    let mut media = MediaSourceController::new(MockDevices::new());
    let camera = media.acquire_camera().await.unwrap();
    media
        .substitute_active_source::<MockPeer>(None, camera.clone())
        .await
        .unwrap();

    media.release_all();
    media.release_all();

    assert!(media.active().is_none());
    assert!(camera.tracks().iter().all(|t| !t.is_live()));
}
