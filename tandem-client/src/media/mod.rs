mod controller;
mod devices;
mod local_source;
mod local_track;
mod media_kind;

pub use controller::*;
pub use devices::*;
pub use local_source::*;
pub use local_track::*;
pub use media_kind::*;
