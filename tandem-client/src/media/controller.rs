use crate::error::MediaError;
use crate::media::{
    Constraints, LocalSource, LocalTrack, MediaDevices, MediaKind, SourceKind, TrackState,
};
use crate::transport::PeerTransport;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What a substitution did to the outgoing senders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Substitution {
    pub video_replaced: bool,
    pub audio_replaced: bool,
    /// The previous audio track kept feeding its sender and now belongs to the new source.
    pub audio_carried_over: bool,
}

/// Owns the active local source and swaps it without renegotiation.
pub struct MediaSourceController<D> {
    devices: D,
    active: Option<LocalSource>,
}

impl<D: MediaDevices> MediaSourceController<D> {
    pub fn new(devices: D) -> Self {
        Self {
            devices,
            active: None,
        }
    }

    pub fn devices(&self) -> &D {
        &self.devices
    }

    pub fn active(&self) -> Option<&LocalSource> {
        self.active.as_ref()
    }

    pub async fn acquire_camera(&self) -> Result<LocalSource, MediaError> {
        let tracks = self.devices.user_media(Constraints::CAMERA_AND_MIC).await?;
        LocalSource::from_tracks(SourceKind::Camera, tracks)
    }

    /// Screen with system audio, falling back to video only. A screen without
    /// audio gets the microphone if it can be had.
    pub async fn acquire_screen(&self) -> Result<LocalSource, MediaError> {
        let tracks = match self.devices.display_media(true).await {
            Ok(tracks) => tracks,
            Err(e) => {
                debug!("Screen capture with audio failed ({}), retrying video only", e);
                self.devices.display_media(false).await?
            }
        };
        let mut source = LocalSource::from_tracks(SourceKind::Screen, tracks)?;

        if source.audio().is_none() {
            match self.devices.user_media(Constraints::MIC_ONLY).await {
                Ok(tracks) => {
                    let mut mic = None;
                    for track in tracks {
                        if track.kind() == MediaKind::Audio && mic.is_none() {
                            mic = Some(track);
                        } else {
                            track.stop();
                        }
                    }
                    source.set_audio(mic);
                }
                Err(e) => debug!("Screen share continues without microphone: {}", e),
            }
        }

        Ok(source)
    }

    /// Makes `new` the active source.
    ///
    /// With a live `peer`, each outgoing sender gets the new track of its own
    /// kind in place. Replaced tracks are stopped; a previous audio track is
    /// carried over when the new source has none.
    pub async fn substitute_active_source<P>(
        &mut self,
        peer: Option<&P>,
        mut new: LocalSource,
    ) -> Result<Substitution, MediaError>
    where
        P: PeerTransport + ?Sized,
    {
        let mut outcome = Substitution::default();

        if let Some(peer) = peer {
            match peer.replace_track(MediaKind::Video, new.video()).await {
                Ok(replaced) => outcome.video_replaced = replaced,
                Err(e) => {
                    new.stop();
                    return Err(e.into());
                }
            }

            if let Some(audio) = new.audio().cloned() {
                match peer.replace_track(MediaKind::Audio, &audio).await {
                    Ok(replaced) => outcome.audio_replaced = replaced,
                    Err(e) => {
                        warn!("Audio replacement failed, keeping previous audio: {}", e);
                        audio.stop();
                        new.set_audio(None);
                    }
                }
            }
        }

        if let Some(mut old) = self.active.take() {
            old.video().stop();
            match (new.audio().is_some(), old.take_audio()) {
                (false, Some(old_audio)) if old_audio.is_live() => {
                    outcome.audio_carried_over = true;
                    new.set_audio(Some(old_audio));
                }
                (_, Some(old_audio)) => old_audio.stop(),
                _ => {}
            }
        }

        info!(
            "Active source is now {:?} (video replaced: {}, audio replaced: {})",
            new.kind(),
            outcome.video_replaced,
            outcome.audio_replaced
        );
        self.active = Some(new);
        Ok(outcome)
    }

    /// Runs `callback` once if the active screen track is ended by its source.
    ///
    /// Returns `None` when the active source is not a screen. A track that is
    /// stopped locally never triggers the callback.
    pub fn on_screen_share_ended<F>(&self, callback: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce(LocalTrack) + Send + 'static,
    {
        let source = self
            .active
            .as_ref()
            .filter(|s| s.kind() == SourceKind::Screen)?;
        let track = source.video().clone();

        Some(tokio::spawn(async move {
            if track.finished().await == TrackState::Ended {
                info!("Screen share {} ended", track.id());
                callback(track);
            }
        }))
    }

    /// Puts the camera back after `ended` stopped, if that screen is still active.
    ///
    /// Returns `false` when another source has taken over in the meantime.
    pub async fn revert_to_camera<P>(
        &mut self,
        peer: Option<&P>,
        ended: &LocalTrack,
    ) -> Result<bool, MediaError>
    where
        P: PeerTransport + ?Sized,
    {
        let still_active = self
            .active
            .as_ref()
            .is_some_and(|s| s.kind() == SourceKind::Screen && s.video().same_as(ended));
        if !still_active {
            debug!("Ended screen track {} is no longer active", ended.id());
            return Ok(false);
        }

        let camera = self.acquire_camera().await?;
        self.substitute_active_source(peer, camera).await?;
        Ok(true)
    }

    pub fn release_all(&mut self) {
        if let Some(source) = self.active.take() {
            source.stop();
            debug!("Released local {:?} source", source.kind());
        }
    }
}
