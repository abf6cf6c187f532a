use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared hang-up flag. Triggering it ends the session at its next step,
/// even while a negotiation step is still awaiting the transport.
#[derive(Debug, Clone, Default)]
pub struct HangupHandle {
    triggered: Arc<AtomicBool>,
}

impl HangupHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}
