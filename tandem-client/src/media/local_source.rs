use crate::error::MediaError;
use crate::media::{LocalTrack, MediaKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Camera,
    Screen,
}

/// The outgoing media of one participant: one video track and at most one audio track.
#[derive(Debug, Clone)]
pub struct LocalSource {
    kind: SourceKind,
    video: LocalTrack,
    audio: Option<LocalTrack>,
}

impl LocalSource {
    pub fn new(
        kind: SourceKind,
        video: LocalTrack,
        audio: Option<LocalTrack>,
    ) -> Result<Self, MediaError> {
        if video.kind() != MediaKind::Video {
            return Err(MediaError::MissingTrack("video"));
        }
        if audio.as_ref().is_some_and(|a| a.kind() != MediaKind::Audio) {
            return Err(MediaError::MissingTrack("audio"));
        }
        Ok(Self { kind, video, audio })
    }

    /// Builds a source from whatever a capture call returned.
    pub fn from_tracks(kind: SourceKind, tracks: Vec<LocalTrack>) -> Result<Self, MediaError> {
        let mut video = None;
        let mut audio = None;
        for track in tracks {
            match track.kind() {
                MediaKind::Video if video.is_none() => video = Some(track),
                MediaKind::Audio if audio.is_none() => audio = Some(track),
                // extra tracks of a kind are never attached
                _ => track.stop(),
            }
        }

        match video {
            Some(video) => Ok(Self { kind, video, audio }),
            None => {
                if let Some(audio) = audio {
                    audio.stop();
                }
                Err(MediaError::MissingTrack("video"))
            }
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn video(&self) -> &LocalTrack {
        &self.video
    }

    pub fn audio(&self) -> Option<&LocalTrack> {
        self.audio.as_ref()
    }

    pub fn track(&self, kind: MediaKind) -> Option<&LocalTrack> {
        match kind {
            MediaKind::Video => Some(&self.video),
            MediaKind::Audio => self.audio.as_ref(),
        }
    }

    pub fn tracks(&self) -> Vec<LocalTrack> {
        std::iter::once(self.video.clone())
            .chain(self.audio.clone())
            .collect()
    }

    pub(crate) fn set_audio(&mut self, audio: Option<LocalTrack>) {
        self.audio = audio;
    }

    pub(crate) fn take_audio(&mut self) -> Option<LocalTrack> {
        self.audio.take()
    }

    pub fn stop(&self) {
        for track in self.tracks() {
            track.stop();
        }
    }
}
