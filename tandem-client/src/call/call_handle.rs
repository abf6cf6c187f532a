use crate::call::{CallCommand, CallEvent};
use crate::negotiation::{HangupHandle, SessionState};
use tandem_core::SignalMessage;
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Controls a running [`Call`](crate::Call) from the outside.
#[derive(Clone)]
pub struct CallHandle {
    events: mpsc::UnboundedSender<CallEvent>,
    hangup: HangupHandle,
    state: watch::Receiver<SessionState>,
}

impl CallHandle {
    pub(crate) fn new(
        events: mpsc::UnboundedSender<CallEvent>,
        hangup: HangupHandle,
        state: watch::Receiver<SessionState>,
    ) -> Self {
        Self {
            events,
            hangup,
            state,
        }
    }

    pub fn start_camera(&self) {
        self.send(CallEvent::Command(CallCommand::StartCamera));
    }

    pub fn share_screen(&self) {
        self.send(CallEvent::Command(CallCommand::ShareScreen));
    }

    pub fn start_call(&self) {
        self.send(CallEvent::Command(CallCommand::StartCall));
    }

    /// Takes effect immediately; a step already in flight discards its result.
    pub fn hang_up(&self) {
        self.hangup.trigger();
        self.send(CallEvent::Command(CallCommand::HangUp));
    }

    /// Hands a relayed message to the call.
    pub fn deliver(&self, msg: SignalMessage) {
        self.send(CallEvent::Signal(msg));
    }

    pub fn signaling_closed(&self) {
        self.send(CallEvent::SignalingClosed);
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Waits until the session state satisfies `predicate`.
    ///
    /// Returns `None` if the call finished without reaching it.
    pub async fn wait_for_state<F>(&self, mut predicate: F) -> Option<SessionState>
    where
        F: FnMut(&SessionState) -> bool,
    {
        let mut rx = self.state.clone();
        rx.wait_for(|state| predicate(state)).await.ok().map(|state| *state)
    }

    fn send(&self, event: CallEvent) {
        if self.events.send(event).is_err() {
            debug!("Call already finished");
        }
    }
}
