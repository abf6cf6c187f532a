mod inbound_frame;
mod signaling_service;
mod ws_handler;

pub use inbound_frame::*;
pub use signaling_service::*;
pub use ws_handler::*;
