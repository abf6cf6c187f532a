use crate::config::rtc_ice_servers;
use crate::error::TransportError;
use crate::media::{LocalTrack, MediaKind};
use crate::transport::{PeerEvent, PeerState, PeerTransport, SdpKind, SessionDescription};
use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::{IceCandidate, IceServerConfig};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::rtp_transceiver::rtp_transceiver_direction::RTCRtpTransceiverDirection;
use webrtc::rtp_transceiver::{RTCRtpTransceiver, RTCRtpTransceiverInit};
use webrtc::track::track_remote::TrackRemote;

/// [`PeerTransport`] backed by a webrtc-rs peer connection.
pub struct RtcPeer {
    peer_connection: Arc<RTCPeerConnection>,
    // webrtc-rs cannot roll back from have-local-offer, so the offer is
    // installed only when its answer arrives.
    pending_offer: Mutex<Option<RTCSessionDescription>>,
}

impl RtcPeer {
    /// Creates the peer connection. Candidates, state changes and remote
    /// tracks are reported on `event_tx`.
    pub async fn new(
        ice_servers: &[IceServerConfig],
        event_tx: mpsc::UnboundedSender<PeerEvent>,
    ) -> Result<Self, TransportError> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: rtc_ice_servers(ice_servers),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        let state_tx = event_tx.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                Box::pin(async move {
                    info!("Peer connection state changed: {}", s);
                    if let Some(state) = map_state(s) {
                        let _ = tx.send(PeerEvent::StateChanged(state));
                    }
                })
            },
        ));

        let ice_tx = event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            Box::pin(async move {
                let Some(candidate) = c else { return };
                match candidate.to_json() {
                    Ok(init) => {
                        let _ = tx.send(PeerEvent::CandidateGenerated(from_rtc_candidate(init)));
                    }
                    Err(e) => warn!("Failed to serialize local candidate: {}", e),
                }
            })
        }));

        let track_tx = event_tx;
        peer_connection.on_track(Box::new(
            move |track: Arc<TrackRemote>,
                  _receiver: Arc<RTCRtpReceiver>,
                  _transceiver: Arc<RTCRtpTransceiver>| {
                let tx = track_tx.clone();
                Box::pin(async move {
                    let Some(kind) = MediaKind::from_codec_type(track.kind()) else {
                        return;
                    };
                    debug!("Remote {} track arrived", kind);
                    let _ = tx.send(PeerEvent::RemoteTrack {
                        kind,
                        track_id: track.id(),
                    });
                })
            },
        ));

        Ok(Self {
            peer_connection,
            pending_offer: Mutex::new(None),
        })
    }

    pub fn peer_connection(&self) -> &Arc<RTCPeerConnection> {
        &self.peer_connection
    }
}

#[async_trait]
impl PeerTransport for RtcPeer {
    async fn add_track(&self, track: &LocalTrack) -> Result<(), TransportError> {
        self.peer_connection.add_track(track.rtc_track()).await?;
        debug!("Attached local {} track {}", track.kind(), track.id());
        Ok(())
    }

    async fn add_receive_only(&self, kind: MediaKind) -> Result<(), TransportError> {
        let codec_type = kind.into();
        // remote offers already create a transceiver per media section
        let exists = self
            .peer_connection
            .get_transceivers()
            .await
            .iter()
            .any(|t| t.kind() == codec_type);
        if exists {
            return Ok(());
        }

        self.peer_connection
            .add_transceiver_from_kind(
                codec_type,
                Some(RTCRtpTransceiverInit {
                    direction: RTCRtpTransceiverDirection::Recvonly,
                    send_encodings: vec![],
                }),
            )
            .await?;
        Ok(())
    }

    async fn create_offer(&self) -> Result<String, TransportError> {
        let offer = self.peer_connection.create_offer(None).await?;
        let sdp = offer.sdp.clone();
        *self.pending_offer.lock().await = Some(offer);
        Ok(sdp)
    }

    async fn create_answer(&self) -> Result<String, TransportError> {
        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await?;
        Ok(answer.sdp)
    }

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), TransportError> {
        match desc.kind {
            SdpKind::Offer => {
                if self.pending_offer.lock().await.is_some() {
                    return Err(TransportError::Rejected(
                        "remote offer while a local offer is pending".to_owned(),
                    ));
                }
                let offer = RTCSessionDescription::offer(desc.sdp)?;
                self.peer_connection.set_remote_description(offer).await?;
            }
            SdpKind::Answer => {
                let answer = RTCSessionDescription::answer(desc.sdp)?;
                if let Some(offer) = self.pending_offer.lock().await.take() {
                    self.peer_connection.set_local_description(offer).await?;
                }
                self.peer_connection.set_remote_description(answer).await?;
            }
        }
        Ok(())
    }

    async fn rollback(&self) -> Result<(), TransportError> {
        match self.pending_offer.lock().await.take() {
            Some(_) => {
                debug!("Withdrew pending local offer");
                Ok(())
            }
            None => Err(TransportError::Rejected(
                "no local offer to roll back".to_owned(),
            )),
        }
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), TransportError> {
        self.peer_connection
            .add_ice_candidate(to_rtc_candidate(candidate))
            .await?;
        Ok(())
    }

    async fn replace_track(
        &self,
        kind: MediaKind,
        track: &LocalTrack,
    ) -> Result<bool, TransportError> {
        let codec_type = kind.into();
        for sender in self.peer_connection.get_senders().await {
            let Some(current) = sender.track().await else {
                continue;
            };
            if current.kind() != codec_type {
                continue;
            }
            sender.replace_track(Some(track.rtc_track())).await?;
            debug!("Replaced outgoing {} track with {}", kind, track.id());
            return Ok(true);
        }
        Ok(false)
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

fn map_state(s: RTCPeerConnectionState) -> Option<PeerState> {
    match s {
        RTCPeerConnectionState::New => Some(PeerState::New),
        RTCPeerConnectionState::Connecting => Some(PeerState::Connecting),
        RTCPeerConnectionState::Connected => Some(PeerState::Connected),
        RTCPeerConnectionState::Disconnected => Some(PeerState::Disconnected),
        RTCPeerConnectionState::Failed => Some(PeerState::Failed),
        RTCPeerConnectionState::Closed => Some(PeerState::Closed),
        _ => None,
    }
}

fn from_rtc_candidate(init: RTCIceCandidateInit) -> IceCandidate {
    IceCandidate {
        candidate: init.candidate,
        sdp_mid: init.sdp_mid,
        sdp_m_line_index: init.sdp_mline_index,
        username_fragment: init.username_fragment,
    }
}

fn to_rtc_candidate(candidate: IceCandidate) -> RTCIceCandidateInit {
    RTCIceCandidateInit {
        candidate: candidate.candidate,
        sdp_mid: candidate.sdp_mid,
        sdp_mline_index: candidate.sdp_m_line_index,
        username_fragment: candidate.username_fragment,
    }
}
