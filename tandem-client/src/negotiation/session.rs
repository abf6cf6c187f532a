use crate::error::{NegotiationError, TransportError};
use crate::media::{LocalSource, LocalTrack, MediaKind};
use crate::negotiation::{CandidateQueue, HangupHandle, Role, SessionState};
use crate::transport::{PeerTransport, SessionDescription};
use std::sync::Arc;
use tandem_core::{RoomId, SenderId, SignalMessage, SignalPayload};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The local user starts the call.
    Call,
    /// A message relayed from the other participant.
    Remote(SignalMessage),
    Hangup,
    /// The peer connection or the signaling channel went away.
    TransportLost,
}

impl SessionEvent {
    fn label(&self) -> &'static str {
        match self {
            SessionEvent::Call => "call",
            SessionEvent::Remote(msg) => msg.payload.kind(),
            SessionEvent::Hangup => "hangup",
            SessionEvent::TransportLost => "transport lost",
        }
    }
}

/// One call attempt between the local participant and the other member of a room.
pub struct NegotiationSession<P: ?Sized> {
    room_id: RoomId,
    sender_id: SenderId,
    peer: Arc<P>,
    state: SessionState,
    candidates: CandidateQueue,
    local: Option<LocalSource>,
    attached: Vec<LocalTrack>,
    media_declared: bool,
    remote_applied: bool,
    hangup: HangupHandle,
}

impl<P: PeerTransport + ?Sized> NegotiationSession<P> {
    pub fn new(room_id: RoomId, sender_id: SenderId, peer: Arc<P>) -> Self {
        Self {
            room_id,
            sender_id,
            peer,
            state: SessionState::Idle,
            candidates: CandidateQueue::new(),
            local: None,
            attached: Vec::new(),
            media_declared: false,
            remote_applied: false,
            hangup: HangupHandle::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }

    pub fn peer(&self) -> &Arc<P> {
        &self.peer
    }

    pub fn candidates(&self) -> &CandidateQueue {
        &self.candidates
    }

    pub fn hangup_handle(&self) -> HangupHandle {
        self.hangup.clone()
    }

    /// The media attached when the session next declares its tracks.
    pub fn use_local_source(&mut self, source: Option<&LocalSource>) {
        self.local = source.cloned();
    }

    /// The peer, once outgoing media has been declared on it.
    pub fn live_peer(&self) -> Option<&P> {
        (self.media_declared && self.state != SessionState::Closed).then(|| &*self.peer)
    }

    /// Whether a relayed message is meant for this session.
    pub fn accepts(&self, msg: &SignalMessage) -> bool {
        msg.room_id == self.room_id && msg.sender_id != self.sender_id
    }

    /// Applies one event. Returns the message to relay to the other participant, if any.
    pub async fn handle(
        &mut self,
        event: SessionEvent,
    ) -> Result<Option<SignalMessage>, NegotiationError> {
        if self.state == SessionState::Closed {
            debug!("Session closed, discarding {}", event.label());
            return Ok(None);
        }
        if self.hangup.is_triggered() {
            self.close().await;
            return Ok(None);
        }

        match event {
            SessionEvent::Call => self.start_call().await,
            SessionEvent::Remote(msg) => {
                if !self.accepts(&msg) {
                    debug!(
                        "Ignoring {} from {} for room {}",
                        msg.payload.kind(),
                        msg.sender_id,
                        msg.room_id
                    );
                    return Ok(None);
                }
                self.on_remote(msg).await
            }
            SessionEvent::Hangup => {
                self.close().await;
                Ok(None)
            }
            SessionEvent::TransportLost => {
                warn!("Transport lost while {}", self.state);
                self.close().await;
                Ok(None)
            }
        }
    }

    async fn start_call(&mut self) -> Result<Option<SignalMessage>, NegotiationError> {
        if self.state != SessionState::Idle {
            warn!("Ignoring call request while {}", self.state);
            return Ok(None);
        }
        self.state = SessionState::Negotiating(Role::Offering);

        if let Err(e) = self.attach_local_media().await {
            return Err(self.fail(NegotiationError::AttachMedia(e)).await);
        }
        if self.cancelled().await {
            return Ok(None);
        }

        let sdp = match self.peer.create_offer().await {
            Ok(sdp) => sdp,
            Err(source) => {
                return Err(self
                    .fail(NegotiationError::LocalDescription {
                        kind: "offer",
                        source,
                    })
                    .await);
            }
        };
        if self.cancelled().await {
            return Ok(None);
        }

        info!("Sending offer to room {}", self.room_id);
        Ok(Some(self.outgoing(SignalPayload::Offer { sdp })))
    }

    async fn on_remote(
        &mut self,
        msg: SignalMessage,
    ) -> Result<Option<SignalMessage>, NegotiationError> {
        match msg.payload {
            SignalPayload::Offer { sdp } => self.on_offer(sdp, &msg.sender_id).await,
            SignalPayload::Answer { sdp } => self.on_answer(sdp).await,
            SignalPayload::Ice { candidate } => {
                self.candidates
                    .enqueue_or_apply(&*self.peer, candidate)
                    .await;
                Ok(None)
            }
        }
    }

    async fn on_offer(
        &mut self,
        sdp: String,
        from: &SenderId,
    ) -> Result<Option<SignalMessage>, NegotiationError> {
        let previous = self.state;
        match previous {
            SessionState::Negotiating(Role::Offering) => {
                if !self.yields_to(from) {
                    info!("Both sides offered, keeping the local offer over {}", from);
                    return Ok(None);
                }
                info!("Both sides offered, withdrawing the local offer for {}", from);
                if let Err(e) = self.peer.rollback().await {
                    return Err(self.fail(NegotiationError::Rollback(e)).await);
                }
            }
            SessionState::Connected => info!("Remote side is renegotiating"),
            _ => info!("Received offer in room {}", self.room_id),
        }
        self.state = SessionState::Negotiating(Role::Answering);

        let applied = self.apply_remote(SessionDescription::offer(sdp)).await?;
        if self.cancelled().await {
            return Ok(None);
        }
        if !applied {
            self.state = previous;
            return Ok(None);
        }

        if let Err(e) = self.attach_local_media().await {
            return Err(self.fail(NegotiationError::AttachMedia(e)).await);
        }
        if self.cancelled().await {
            return Ok(None);
        }

        let sdp = match self.peer.create_answer().await {
            Ok(sdp) => sdp,
            Err(source) => {
                return Err(self
                    .fail(NegotiationError::LocalDescription {
                        kind: "answer",
                        source,
                    })
                    .await);
            }
        };

        self.candidates.flush(&*self.peer).await;
        if self.cancelled().await {
            return Ok(None);
        }

        self.state = SessionState::Connected;
        info!("Sending answer to room {}", self.room_id);
        Ok(Some(self.outgoing(SignalPayload::Answer { sdp })))
    }

    async fn on_answer(&mut self, sdp: String) -> Result<Option<SignalMessage>, NegotiationError> {
        if self.state != SessionState::Negotiating(Role::Offering) {
            warn!("Ignoring answer while {}", self.state);
            return Ok(None);
        }

        let applied = self.apply_remote(SessionDescription::answer(sdp)).await?;
        if self.cancelled().await || !applied {
            return Ok(None);
        }

        self.candidates.flush(&*self.peer).await;
        if self.cancelled().await {
            return Ok(None);
        }

        self.state = SessionState::Connected;
        info!("Call connected in room {}", self.room_id);
        Ok(None)
    }

    /// When both sides offer at once, the lower sender id answers the other offer.
    fn yields_to(&self, other: &SenderId) -> bool {
        self.sender_id < *other
    }

    /// `Ok(false)` means the description was refused and skipped.
    async fn apply_remote(&mut self, desc: SessionDescription) -> Result<bool, NegotiationError> {
        match self.peer.set_remote_description(desc).await {
            Ok(()) => {
                self.remote_applied = true;
                Ok(true)
            }
            Err(_) if self.hangup.is_triggered() => Ok(false),
            Err(e) if !self.remote_applied => {
                Err(self.fail(NegotiationError::RemoteDescriptionRejected(e)).await)
            }
            Err(e) => {
                warn!("Skipping rejected remote description: {}", e);
                Ok(false)
            }
        }
    }

    async fn attach_local_media(&mut self) -> Result<(), TransportError> {
        if self.media_declared {
            return self.attach_pending_media().await;
        }

        match self.local.as_ref().map(LocalSource::tracks) {
            Some(tracks) => {
                for track in tracks {
                    self.peer.add_track(&track).await?;
                    self.attached.push(track);
                }
            }
            None => {
                debug!("No local media, receiving only");
                self.peer.add_receive_only(MediaKind::Video).await?;
                self.peer.add_receive_only(MediaKind::Audio).await?;
            }
        }
        self.media_declared = true;
        Ok(())
    }

    /// Adds local tracks of kinds that have no outgoing sender yet.
    async fn attach_pending_media(&mut self) -> Result<(), TransportError> {
        let Some(source) = self.local.as_ref() else {
            return Ok(());
        };
        let pending: Vec<LocalTrack> = source
            .tracks()
            .into_iter()
            .filter(|t| !self.attached.iter().any(|a| a.kind() == t.kind()))
            .collect();

        for track in pending {
            debug!("Attaching {} track {} on renegotiation", track.kind(), track.id());
            self.peer.add_track(&track).await?;
            self.attached.push(track);
        }
        Ok(())
    }

    /// Closes the session if hang-up was requested while a step was in flight.
    async fn cancelled(&mut self) -> bool {
        if self.state == SessionState::Closed {
            return true;
        }
        if self.hangup.is_triggered() {
            debug!("Hang-up arrived mid-step, discarding result");
            self.close().await;
            return true;
        }
        false
    }

    async fn fail(&mut self, err: NegotiationError) -> NegotiationError {
        error!("Call attempt failed: {}", err);
        self.close().await;
        err
    }

    async fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.hangup.trigger();
        self.state = SessionState::Closed;
        self.candidates.clear();

        for track in self.attached.drain(..) {
            track.stop();
        }
        if let Some(source) = self.local.take() {
            source.stop();
        }
        if let Err(e) = self.peer.close().await {
            warn!("Error closing peer connection: {}", e);
        }
        info!("Session in room {} closed", self.room_id);
    }

    fn outgoing(&self, payload: SignalPayload) -> SignalMessage {
        SignalMessage::new(self.room_id.clone(), self.sender_id.clone(), payload)
    }
}
