use crate::call::{CallCommand, CallEvent, CallHandle};
use crate::config::ClientConfig;
use crate::error::{ClientError, Notice};
use crate::media::{LocalSource, MediaDevices, MediaSourceController};
use crate::negotiation::{NegotiationSession, SessionEvent, SessionState};
use crate::signaling::SignalingClient;
use crate::transport::{PeerEvent, PeerTransport, RtcPeer};
use std::sync::Arc;
use tandem_core::{Membership, SignalMessage, SignalPayload};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// One call: a negotiation session plus the local media feeding it.
///
/// Inputs arrive as [`CallEvent`]s and are handled strictly one at a time.
/// Outgoing signals go to `signals_out`; user-facing failures to the notice
/// channel returned by [`Call::new`].
pub struct Call<P: ?Sized, D> {
    session: NegotiationSession<P>,
    media: MediaSourceController<D>,
    events_tx: mpsc::WeakUnboundedSender<CallEvent>,
    events_rx: mpsc::UnboundedReceiver<CallEvent>,
    peer_events: mpsc::UnboundedReceiver<PeerEvent>,
    signals_out: mpsc::UnboundedSender<SignalMessage>,
    notices: mpsc::UnboundedSender<Notice>,
    state: watch::Sender<SessionState>,
}

impl<P, D> Call<P, D>
where
    P: PeerTransport + ?Sized,
    D: MediaDevices,
{
    pub fn new(
        session: NegotiationSession<P>,
        devices: D,
        peer_events: mpsc::UnboundedReceiver<PeerEvent>,
        signals_out: mpsc::UnboundedSender<SignalMessage>,
    ) -> (Self, CallHandle, mpsc::UnboundedReceiver<Notice>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (notices, notices_rx) = mpsc::unbounded_channel();
        let (state, state_rx) = watch::channel(session.state());
        let handle = CallHandle::new(events_tx.clone(), session.hangup_handle(), state_rx);

        let call = Self {
            session,
            media: MediaSourceController::new(devices),
            events_tx: events_tx.downgrade(),
            events_rx,
            peer_events,
            signals_out,
            notices,
            state,
        };
        (call, handle, notices_rx)
    }

    pub fn session(&self) -> &NegotiationSession<P> {
        &self.session
    }

    pub fn media(&self) -> &MediaSourceController<D> {
        &self.media
    }

    /// Handles events until the session is closed. Dropping every
    /// [`CallHandle`] counts as hanging up.
    pub async fn run(mut self) {
        info!("Call in room {} started", self.session.room_id());
        loop {
            let event = tokio::select! {
                event = self.events_rx.recv() => match event {
                    Some(event) => event,
                    None => {
                        debug!("All call handles dropped");
                        CallEvent::Command(CallCommand::HangUp)
                    }
                },
                Some(event) = self.peer_events.recv() => CallEvent::Peer(event),
            };

            self.dispatch(event).await;
            self.state.send_replace(self.session.state());
            if self.session.state() == SessionState::Closed {
                break;
            }
        }

        self.media.release_all();
        info!("Call in room {} ended", self.session.room_id());
    }

    async fn dispatch(&mut self, event: CallEvent) {
        match event {
            CallEvent::Command(command) => self.on_command(command).await,
            CallEvent::Signal(msg) => {
                self.session.use_local_source(self.media.active());
                self.drive(SessionEvent::Remote(msg)).await;
            }
            CallEvent::Peer(PeerEvent::CandidateGenerated(candidate)) => {
                if self.session.state() == SessionState::Closed {
                    return;
                }
                let msg = SignalMessage::new(
                    self.session.room_id().clone(),
                    self.session.sender_id().clone(),
                    SignalPayload::Ice { candidate },
                );
                self.emit(msg);
            }
            CallEvent::Peer(PeerEvent::StateChanged(state)) => {
                info!("Peer connection is {:?}", state);
                if state.is_terminal() && self.session.state() != SessionState::Closed {
                    self.drive(SessionEvent::TransportLost).await;
                    self.notify(Notice::ConnectionLost);
                }
            }
            CallEvent::Peer(PeerEvent::RemoteTrack { kind, track_id }) => {
                info!("Receiving remote {} track {}", kind, track_id);
            }
            CallEvent::ScreenShareEnded(track) => {
                let peer = self.session.live_peer();
                match self.media.revert_to_camera(peer, &track).await {
                    Ok(true) => self.session.use_local_source(self.media.active()),
                    Ok(false) => {}
                    Err(e) => {
                        warn!("Could not restore camera after screen share: {}", e);
                        self.notify(Notice::MediaRequired);
                    }
                }
            }
            CallEvent::SignalingClosed => {
                if self.session.state().is_negotiating() {
                    self.drive(SessionEvent::TransportLost).await;
                    self.notify(Notice::ConnectionLost);
                } else {
                    warn!("Signaling connection closed while {}", self.session.state());
                }
            }
        }
    }

    async fn on_command(&mut self, command: CallCommand) {
        debug!("Command {:?}", command);
        match command {
            CallCommand::StartCamera => match self.media.acquire_camera().await {
                Ok(source) => self.substitute(source).await,
                Err(e) => {
                    warn!("Camera unavailable: {}", e);
                    self.notify(Notice::MediaRequired);
                }
            },
            CallCommand::ShareScreen => match self.media.acquire_screen().await {
                Ok(source) => {
                    self.substitute(source).await;
                    self.watch_screen_share();
                }
                Err(e) => {
                    warn!("Screen capture unavailable: {}", e);
                    self.notify(Notice::MediaRequired);
                }
            },
            CallCommand::StartCall => {
                self.session.use_local_source(self.media.active());
                self.drive(SessionEvent::Call).await;
            }
            CallCommand::HangUp => {
                self.drive(SessionEvent::Hangup).await;
                self.media.release_all();
            }
        }
    }

    async fn substitute(&mut self, source: LocalSource) {
        let peer = self.session.live_peer();
        match self.media.substitute_active_source(peer, source).await {
            Ok(_) => self.session.use_local_source(self.media.active()),
            Err(e) => {
                warn!("Source substitution failed: {}", e);
                self.notify(Notice::MediaRequired);
            }
        }
    }

    fn watch_screen_share(&self) {
        let events = self.events_tx.clone();
        self.media.on_screen_share_ended(move |track| {
            if let Some(tx) = events.upgrade() {
                let _ = tx.send(CallEvent::ScreenShareEnded(track));
            }
        });
    }

    async fn drive(&mut self, event: SessionEvent) {
        match self.session.handle(event).await {
            Ok(Some(msg)) => self.emit(msg),
            Ok(None) => {}
            Err(e) => {
                error!("Negotiation failed: {}", e);
                self.notify(Notice::CallFailed);
            }
        }
    }

    fn emit(&self, msg: SignalMessage) {
        if self.signals_out.send(msg).is_err() {
            warn!("Signaling output closed, dropping message");
        }
    }

    fn notify(&self, notice: Notice) {
        let _ = self.notices.send(notice);
    }
}

impl<D> Call<RtcPeer, D>
where
    D: MediaDevices + 'static,
{
    /// Connects to the relay, joins the configured room and spawns the call.
    ///
    /// The room is left once the call ends.
    pub async fn connect(
        config: ClientConfig,
        devices: D,
    ) -> Result<(CallHandle, mpsc::UnboundedReceiver<Notice>, JoinHandle<()>), ClientError> {
        let membership = Membership {
            room_id: config.room_id.clone(),
            sender_id: config.sender_id.clone(),
        };
        let (signaling, mut inbound) = SignalingClient::connect(&config.url, membership).await?;

        let (peer_tx, peer_rx) = mpsc::unbounded_channel();
        let peer = Arc::new(RtcPeer::new(&config.ice_servers, peer_tx).await?);
        let session = NegotiationSession::new(config.room_id, config.sender_id, peer);

        let (signals_tx, mut signals_rx) = mpsc::unbounded_channel();
        let (call, handle, notices) = Call::new(session, devices, peer_rx, signals_tx);

        let forward = handle.clone();
        tokio::spawn(async move {
            while let Some(msg) = inbound.recv().await {
                forward.deliver(msg);
            }
            forward.signaling_closed();
        });

        let task = tokio::spawn(async move {
            let outbound = async {
                while let Some(msg) = signals_rx.recv().await {
                    if let Err(e) = signaling.signal(msg) {
                        warn!("Failed to send signal: {}", e);
                        break;
                    }
                }
            };
            tokio::join!(call.run(), outbound);
            if let Err(e) = signaling.leave() {
                debug!("Could not leave room: {}", e);
            }
        });

        Ok((handle, notices, task))
    }
}
