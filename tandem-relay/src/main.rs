use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tandem_server::{AppState, ServerConfig, router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tandem-relay", version, about = "Signaling relay for two-party calls")]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "TANDEM_BIND", default_value = "0.0.0.0:4000")]
    bind: SocketAddr,

    /// Origin allowed by CORS. Any origin when unset.
    #[arg(long, env = "TANDEM_ALLOWED_ORIGIN")]
    allowed_origin: Option<String>,

    /// Default page size of chat history queries.
    #[arg(long, env = "TANDEM_HISTORY_LIMIT", default_value_t = 100)]
    history_limit: usize,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            allowed_origin: self.allowed_origin.clone(),
            history_limit: self.history_limit,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let state = Arc::new(AppState::in_memory(cli.server_config()));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;
    info!("Signaling relay listening on http://{}", cli.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutting down");
}
