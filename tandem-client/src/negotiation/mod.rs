mod candidate_queue;
mod hangup;
mod session;
mod session_state;

pub use candidate_queue::*;
pub use hangup::*;
pub use session::*;
pub use session_state::*;
