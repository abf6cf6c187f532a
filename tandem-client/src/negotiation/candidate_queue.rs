use crate::transport::PeerTransport;
use tandem_core::IceCandidate;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Applied,
    Buffered,
    /// The transport refused it; logged and skipped.
    Rejected,
}

/// Holds remote candidates until the first remote description is applied.
#[derive(Debug, Default)]
pub struct CandidateQueue {
    buffered: Vec<IceCandidate>,
    flushed: bool,
}

impl CandidateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buffered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffered.is_empty()
    }

    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    pub async fn enqueue_or_apply<P>(&mut self, peer: &P, candidate: IceCandidate) -> Admission
    where
        P: PeerTransport + ?Sized,
    {
        if !self.flushed {
            debug!("Buffering remote candidate ({} pending)", self.buffered.len() + 1);
            self.buffered.push(candidate);
            return Admission::Buffered;
        }

        match peer.add_ice_candidate(candidate).await {
            Ok(()) => Admission::Applied,
            Err(e) => {
                warn!("Skipping remote candidate: {}", e);
                Admission::Rejected
            }
        }
    }

    /// Applies buffered candidates in arrival order and switches to direct
    /// application. Returns how many were applied; later calls do nothing.
    pub async fn flush<P>(&mut self, peer: &P) -> usize
    where
        P: PeerTransport + ?Sized,
    {
        if self.flushed {
            return 0;
        }
        self.flushed = true;

        let mut applied = 0;
        for candidate in std::mem::take(&mut self.buffered) {
            match peer.add_ice_candidate(candidate).await {
                Ok(()) => applied += 1,
                Err(e) => warn!("Skipping buffered candidate: {}", e),
            }
        }
        debug!("Flushed {} buffered candidates", applied);
        applied
    }

    pub fn clear(&mut self) {
        self.buffered.clear();
    }
}
