//! ProType multiplayer race server - Entry Point

use std::env;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use protype_server::{handle_connection, RaceServer};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Channel buffer size for server commands
const CHANNEL_BUFFER_SIZE: usize = 256;

/// Bind address: first CLI argument, then PROTYPE_ADDR, then the default
fn bind_addr() -> String {
    env::args()
        .nth(1)
        .or_else(|| env::var("PROTYPE_ADDR").ok())
        .unwrap_or_else(|| DEFAULT_ADDR.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log level via RUST_LOG, e.g. RUST_LOG=protype_server=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("protype_server=info")),
        )
        .init();

    let addr = bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    // Start the room actor before accepting anyone
    let (cmd_tx, cmd_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
    tokio::spawn(RaceServer::new(cmd_rx).run());

    info!("ProType server listening on {}", addr);

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let cmd_tx = cmd_tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, cmd_tx).await {
                        error!("Connection handler error for {}: {}", peer, e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
