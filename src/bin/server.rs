//! Session server binary.
//!
//! Serves the line-delimited JSON protocol over TCP. Configure with the
//! `BLOCKTRIS_*` environment variables and `RUST_LOG` (default `info`).

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use blocktris::adapter::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        max_sessions = config.max_sessions,
        width = config.engine.width,
        height = config.engine.height,
        "starting session server"
    );

    run_server(config, None).await
}
