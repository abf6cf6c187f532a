use thiserror::Error;

/// Failures of the underlying peer connection.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("webrtc: {0}")]
    Rtc(#[from] webrtc::Error),

    #[error("{0}")]
    Rejected(String),

    #[error("peer connection is closed")]
    Closed,
}

/// Capture failures. Never fatal to a call.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("{0} access was not granted")]
    PermissionDenied(&'static str),

    #[error("{0} capture is not supported")]
    NotSupported(&'static str),

    #[error("capture returned no {0} track")]
    MissingTrack(&'static str),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Error)]
pub enum NegotiationError {
    /// The first remote description of the session was rejected; the attempt is over.
    #[error("remote description rejected: {0}")]
    RemoteDescriptionRejected(#[source] TransportError),

    #[error("failed to create local {kind}: {source}")]
    LocalDescription {
        kind: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("failed to attach local media: {0}")]
    AttachMedia(#[source] TransportError),

    #[error("failed to withdraw local offer: {0}")]
    Rollback(#[source] TransportError),
}

#[derive(Debug, Error)]
pub enum SignalingError {
    #[error("websocket: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("serialization: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("signaling connection is closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Signaling(#[from] SignalingError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The single user-facing projection of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Notice {
    #[error("Start the camera or share the screen first: media access is required.")]
    MediaRequired,

    #[error("The call could not be established.")]
    CallFailed,

    #[error("The connection to the other participant was lost.")]
    ConnectionLost,
}
