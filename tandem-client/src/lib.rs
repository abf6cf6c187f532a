mod call;
mod config;
mod error;
mod media;
mod negotiation;
mod signaling;
mod transport;

pub use call::*;
pub use config::*;
pub use error::*;
pub use media::*;
pub use negotiation::*;
pub use signaling::*;
pub use transport::*;
