mod chat_routes;
mod chat_store;

pub use chat_routes::*;
pub use chat_store::*;
