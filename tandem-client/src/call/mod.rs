mod call_driver;
mod call_event;
mod call_handle;

pub use call_driver::*;
pub use call_event::*;
pub use call_handle::*;
