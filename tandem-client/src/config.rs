use tandem_core::utils::DEFAULT_STUN_ADDR;
use tandem_core::{IceServerConfig, RoomId, SenderId};
use webrtc::ice_transport::ice_server::RTCIceServer;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Signaling websocket, e.g. `ws://localhost:4000/ws`.
    pub url: String,
    pub room_id: RoomId,
    pub sender_id: SenderId,
    /// Falls back to a public STUN server when empty.
    pub ice_servers: Vec<IceServerConfig>,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, room_id: RoomId, sender_id: SenderId) -> Self {
        Self {
            url: url.into(),
            room_id,
            sender_id,
            ice_servers: Vec::new(),
        }
    }
}

pub(crate) fn rtc_ice_servers(servers: &[IceServerConfig]) -> Vec<RTCIceServer> {
    if servers.is_empty() {
        return vec![RTCIceServer {
            urls: vec![DEFAULT_STUN_ADDR.to_owned()],
            ..Default::default()
        }];
    }

    servers
        .iter()
        .map(|server| RTCIceServer {
            urls: server.urls.clone(),
            username: server.username.clone().unwrap_or_default(),
            credential: server.credential.clone().unwrap_or_default(),
        })
        .collect()
}
