use crate::chat::{ChatStore, InMemoryChatStore};
use crate::config::ServerConfig;
use crate::signaling::SignalingService;
use std::sync::Arc;

pub struct AppState {
    pub signaling: SignalingService,
    pub chat: Arc<dyn ChatStore>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig, chat: Arc<dyn ChatStore>) -> Self {
        Self {
            signaling: SignalingService::new(),
            chat,
            config,
        }
    }

    /// State backed by the in-process chat store.
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::new(config, Arc::new(InMemoryChatStore::new()))
    }
}
