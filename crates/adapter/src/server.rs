//! TCP server for the session API
//!
//! Handles incoming connections and dispatches requests to the session registry.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info, warn};

use crate::core::EngineConfig;
use crate::protocol::{build_state, create_error, parse_request, Reply, Request};
use crate::session::SessionRegistry;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_sessions: usize,
    /// Append every inbound and outbound line to this file
    pub log_path: Option<String>,
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_sessions: 64,
            log_path: None,
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("BLOCKTRIS_HOST").unwrap_or(defaults.host);
        let port = env::var("BLOCKTRIS_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let max_sessions = env::var("BLOCKTRIS_MAX_SESSIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_sessions);

        let log_path = env::var("BLOCKTRIS_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            host,
            port,
            max_sessions,
            log_path,
            engine: EngineConfig::from_env(),
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// Session id used by a connection that does not name one
pub fn connection_session_id(client_id: usize) -> String {
    format!("conn-{}", client_id)
}

/// Handle one request line against the registry.
///
/// `default_session` is used when the request has no `session` field.
pub fn handle_line(registry: &mut SessionRegistry, default_session: &str, line: &str) -> Reply {
    let parsed = match parse_request(line) {
        Ok(p) => p,
        Err(err) => return Reply::Error(err),
    };

    let session = parsed.session.as_deref().unwrap_or(default_session);
    let result = match parsed.request {
        Request::New => registry.new_game(session),
        Request::State => registry.state(session),
        Request::Move(action) => registry.apply(session, action),
        Request::Tick => registry.tick(session),
    };

    match result {
        Ok(snap) => Reply::State(build_state(parsed.seq, session, &snap)),
        Err(e) => Reply::Error(create_error(parsed.seq, e.code(), &e.to_string())),
    }
}

/// Start the TCP server
///
/// Sends the bound address on `ready_tx` once listening (useful with port 0).
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    // Fail at startup rather than on the first request.
    config
        .engine
        .new_engine()
        .context("invalid board configuration")?;

    let wire_log_tx = config.log_path.clone().map(spawn_wire_log);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    let bound = listener.local_addr()?;
    info!(%bound, "session server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let registry = Arc::new(Mutex::new(SessionRegistry::new(
        config.engine,
        config.max_sessions,
    )));
    let mut client_id_counter = 0usize;

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        info!(client_id, %addr, "client connected");

        let registry = Arc::clone(&registry);
        let wire_log_tx = wire_log_tx.clone();

        // Spawn task to handle this client
        tokio::spawn(async move {
            let result = handle_client(socket, client_id, Arc::clone(&registry), wire_log_tx).await;
            if let Err(e) = result {
                warn!(client_id, error = %e, "client error");
            }
            // The connection's implicit session dies with it.
            registry
                .lock()
                .await
                .remove(&connection_session_id(client_id));
            info!(client_id, "client disconnected");
        });
    }
}

/// Background task appending raw wire lines to a file
fn spawn_wire_log(path: String) -> mpsc::UnboundedSender<String> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        use tokio::fs::OpenOptions;

        let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
            Ok(f) => f,
            Err(e) => {
                warn!(%path, error = %e, "cannot open wire log");
                return;
            }
        };

        while let Some(line) = rx.recv().await {
            if file.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if file.write_all(b"\n").await.is_err() {
                break;
            }
        }

        let _ = file.flush().await;
    });
    tx
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    registry: Arc<Mutex<SessionRegistry>>,
    wire_log_tx: Option<mpsc::UnboundedSender<String>>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);
    let default_session = connection_session_id(client_id);

    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            // Client disconnected
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(tx) = wire_log_tx.as_ref() {
            let _ = tx.send(trimmed.to_string());
        }

        // Hold the lock for the whole request so mutations never interleave.
        let reply = {
            let mut registry = registry.lock().await;
            handle_line(&mut registry, &default_session, trimmed)
        };
        debug!(client_id, seq = reply.seq(), "request handled");

        let out = reply.to_line()?;
        writer.write_all(out.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;

        if let Some(tx) = wire_log_tx.as_ref() {
            let _ = tx.send(out);
        }
    }

    Ok(())
}
