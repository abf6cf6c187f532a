use crate::integration::init_tracing;
use crate::utils::MockDevices;
use tandem_client::{MediaError, MediaSourceController, SourceKind};

#[tokio::test]
async fn test_acquire_camera() {
    let media = MediaSourceController::new(MockDevices::new());

    let source = media.acquire_camera().await.unwrap();

    assert_eq!(source.kind(), SourceKind::Camera);
    assert!(source.video().id().starts_with("camera"));
    assert!(source.audio().unwrap().id().starts_with("mic"));
    // Acquiring does not activate.
    assert!(media.active().is_none());
}

#[tokio::test]
async fn test_denied_camera_is_reported() {
    let devices = MockDevices::new();
    devices.deny_camera();
    let media = MediaSourceController::new(devices);

    let err = media.acquire_camera().await.unwrap_err();
    assert!(matches!(err, MediaError::PermissionDenied("camera")));
}

#[tokio::test]
async fn test_screen_with_system_audio() {
    let devices = MockDevices::new();
    let media = MediaSourceController::new(devices.clone());

    let source = media.acquire_screen().await.unwrap();

    assert_eq!(source.kind(), SourceKind::Screen);
    assert!(source.audio().unwrap().id().starts_with("system-audio"));
    assert_eq!(devices.requests(), vec!["display_media(audio=true)"]);
}

#[tokio::test]
async fn test_screen_falls_back_to_video_and_microphone() {
    init_tracing();
    let devices = MockDevices::new();
    devices.without_system_audio();
    let media = MediaSourceController::new(devices.clone());

    let source = media.acquire_screen().await.unwrap();

    assert!(source.video().id().starts_with("screen"));
    assert!(source.audio().unwrap().id().starts_with("mic"));
    assert_eq!(
        devices.requests(),
        vec![
            "display_media(audio=true)",
            "display_media(audio=false)",
            "user_media(video=false, audio=true)",
        ]
    );
}

#[tokio::test]
async fn test_screen_without_any_audio_is_still_shared() {
    let devices = MockDevices::new();
    devices.without_system_audio();
    devices.deny_microphone();
    let media = MediaSourceController::new(devices);

    let source = media.acquire_screen().await.unwrap();

    assert_eq!(source.kind(), SourceKind::Screen);
    assert!(source.audio().is_none());
}
