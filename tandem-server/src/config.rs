use axum::http::HeaderValue;
use tandem_core::utils::DEFAULT_HISTORY_LIMIT;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Origin allowed by CORS; `None` allows any.
    pub allowed_origin: Option<String>,
    /// Page size used when a history query carries no `limit`.
    pub history_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origin: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ServerConfig {
    pub(crate) fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

        let Some(origin) = &self.allowed_origin else {
            return layer.allow_origin(Any);
        };

        match HeaderValue::from_str(origin) {
            Ok(value) => layer.allow_origin(AllowOrigin::exact(value)),
            Err(e) => {
                warn!("Ignoring invalid allowed origin {:?}: {}", origin, e);
                layer.allow_origin(Any)
            }
        }
    }
}
