use crate::error::MediaError;
use crate::media::LocalTrack;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub video: bool,
    pub audio: bool,
}

impl Constraints {
    pub const CAMERA_AND_MIC: Constraints = Constraints {
        video: true,
        audio: true,
    };
    pub const MIC_ONLY: Constraints = Constraints {
        video: false,
        audio: true,
    };
}

/// Platform capture backend.
///
/// Returned tracks are live; the backend feeds samples through
/// [`LocalTrack::sample_writer`] until the track is stopped, and calls
/// [`LocalTrack::end`] when the device or share is revoked.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    /// Camera and/or microphone. Fails as a whole if any requested device is denied.
    async fn user_media(&self, constraints: Constraints) -> Result<Vec<LocalTrack>, MediaError>;

    /// Screen capture, optionally with system audio.
    async fn display_media(&self, with_audio: bool) -> Result<Vec<LocalTrack>, MediaError>;
}

#[async_trait]
impl<T: MediaDevices + ?Sized> MediaDevices for std::sync::Arc<T> {
    async fn user_media(&self, constraints: Constraints) -> Result<Vec<LocalTrack>, MediaError> {
        (**self).user_media(constraints).await
    }

    async fn display_media(&self, with_audio: bool) -> Result<Vec<LocalTrack>, MediaError> {
        (**self).display_media(with_audio).await
    }
}
