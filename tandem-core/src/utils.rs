pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";

/// Default page size for chat history queries.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
