use crate::media::MediaKind;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// Lifecycle of a captured track.
///
/// `Stopped` is set locally (the track was replaced or the call ended),
/// `Ended` by the capture backend (device revoked, user stopped sharing).
/// Both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    Live,
    Stopped,
    Ended,
}

/// A locally captured audio or video track.
///
/// Cheap to clone; clones share the underlying sample track and state.
#[derive(Clone)]
pub struct LocalTrack {
    inner: Arc<TrackInner>,
}

struct TrackInner {
    kind: MediaKind,
    rtc: Arc<TrackLocalStaticSample>,
    state: watch::Sender<TrackState>,
}

impl LocalTrack {
    pub fn new(kind: MediaKind, id: impl Into<String>, stream_id: impl Into<String>) -> Self {
        let mime_type = match kind {
            MediaKind::Audio => MIME_TYPE_OPUS,
            MediaKind::Video => MIME_TYPE_VP8,
        };
        let rtc = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: mime_type.to_owned(),
                ..Default::default()
            },
            id.into(),
            stream_id.into(),
        ));
        let (state, _) = watch::channel(TrackState::Live);

        Self {
            inner: Arc::new(TrackInner { kind, rtc, state }),
        }
    }

    pub fn id(&self) -> &str {
        self.inner.rtc.id()
    }

    pub fn kind(&self) -> MediaKind {
        self.inner.kind
    }

    pub fn state(&self) -> TrackState {
        *self.inner.state.borrow()
    }

    pub fn is_live(&self) -> bool {
        self.state() == TrackState::Live
    }

    /// Sample sink for the capture backend.
    pub fn sample_writer(&self) -> Arc<TrackLocalStaticSample> {
        Arc::clone(&self.inner.rtc)
    }

    pub(crate) fn rtc_track(&self) -> Arc<dyn TrackLocal + Send + Sync> {
        Arc::clone(&self.inner.rtc) as Arc<dyn TrackLocal + Send + Sync>
    }

    /// Stops the track. Backends watching [`LocalTrack::subscribe`] release the device.
    pub fn stop(&self) {
        self.finish(TrackState::Stopped);
    }

    /// Marks the track as ended by its source.
    pub fn end(&self) {
        self.finish(TrackState::Ended);
    }

    pub fn subscribe(&self) -> watch::Receiver<TrackState> {
        self.inner.state.subscribe()
    }

    /// Resolves with the terminal state once the track is no longer live.
    pub async fn finished(&self) -> TrackState {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| *state != TrackState::Live).await {
            Ok(state) => *state,
            Err(_) => TrackState::Stopped,
        }
    }

    pub fn same_as(&self, other: &LocalTrack) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn finish(&self, terminal: TrackState) {
        self.inner.state.send_if_modified(|state| {
            if *state == TrackState::Live {
                *state = terminal;
                true
            } else {
                false
            }
        });
    }
}

impl fmt::Debug for LocalTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalTrack")
            .field("id", &self.id())
            .field("kind", &self.kind())
            .field("state", &self.state())
            .finish()
    }
}
