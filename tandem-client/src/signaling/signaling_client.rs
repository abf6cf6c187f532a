use crate::error::SignalingError;
use futures::{SinkExt, StreamExt};
use tandem_core::{Envelope, Membership, SignalMessage};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Websocket connection to the relay, joined to one room.
///
/// Outgoing frames are queued and written in order by a single task.
pub struct SignalingClient {
    membership: Membership,
    outgoing: mpsc::UnboundedSender<Envelope>,
}

impl SignalingClient {
    /// Connects and joins `membership.room_id`.
    ///
    /// The returned receiver yields signals relayed from the other
    /// participant and ends when the connection closes.
    pub async fn connect(
        url: &str,
        membership: Membership,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SignalMessage>), SignalingError> {
        let (ws_stream, _) = connect_async(url).await?;
        let (mut write, mut read) = ws_stream.split();
        info!("Connected to signaling server at {}", url);

        let (outgoing, mut outgoing_rx) = mpsc::unbounded_channel::<Envelope>();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(envelope) = outgoing_rx.recv().await {
                let json = match serde_json::to_string(&envelope) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!("Failed to serialize frame: {}", e);
                        continue;
                    }
                };
                if write.send(Message::text(json)).await.is_err() {
                    break;
                }
            }
            let _ = write.close().await;
        });

        tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<Envelope>(text.as_str()) {
                        Ok(Envelope::Signal(msg)) => {
                            debug!("Received {} from {}", msg.payload.kind(), msg.sender_id);
                            if inbound_tx.send(msg).is_err() {
                                break;
                            }
                        }
                        Ok(other) => debug!("Ignoring frame {:?}", other),
                        Err(e) => warn!("Dropping malformed frame: {}", e),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Signaling socket error: {}", e);
                        break;
                    }
                }
            }
            info!("Signaling connection closed");
        });

        let client = Self {
            membership,
            outgoing,
        };
        client.send(Envelope::Join(client.membership.clone()))?;
        Ok((client, inbound_rx))
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    pub fn signal(&self, msg: SignalMessage) -> Result<(), SignalingError> {
        debug!("Sending {} to room {}", msg.payload.kind(), msg.room_id);
        self.send(Envelope::Signal(msg))
    }

    pub fn leave(&self) -> Result<(), SignalingError> {
        self.send(Envelope::Leave(self.membership.clone()))
    }

    fn send(&self, envelope: Envelope) -> Result<(), SignalingError> {
        self.outgoing
            .send(envelope)
            .map_err(|_| SignalingError::Closed)
    }
}
