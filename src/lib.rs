//! ProType multiplayer race server library
//!
//! A WebSocket server that lets players share a short-lived room, race
//! against each other on the same text, and see live membership and
//! ranked results. Built with tokio-tungstenite using the Actor pattern
//! for state management.
//!
//! # Features
//! - Room creation with 5-character human-typeable codes
//! - Room joining and live membership snapshots
//! - Host authority: settings updates and race start
//! - Host migration to the earliest-joined remaining player
//! - Leaderboard derivation from client-reported results
//! - Disconnect handling idempotent against explicit leaves
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `RaceServer` is the central actor owning the room registry
//! - Each connection has a `handler` task communicating with the server
//! - No locks needed - all state access goes through message passing,
//!   so every room operation (mutation plus broadcasts) is serialized
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use protype_server::{RaceServer, handle_connection};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
//!     let (cmd_tx, cmd_rx) = mpsc::channel(256);
//!
//!     tokio::spawn(RaceServer::new(cmd_rx).run());
//!
//!     while let Ok((stream, _)) = listener.accept().await {
//!         let cmd_tx = cmd_tx.clone();
//!         tokio::spawn(handle_connection(stream, cmd_tx));
//!     }
//! }
//! ```

pub mod client;
pub mod error;
pub mod handler;
pub mod message;
pub mod room;
pub mod server;
pub mod settings;
pub mod types;

// Re-export main types for convenience
pub use client::Client;
pub use error::{AppError, SendError};
pub use handler::handle_connection;
pub use message::{ClientMessage, PlayerState, RaceResult, ServerMessage};
pub use room::{PlayerSession, Room};
pub use server::{RaceCommand, RaceServer};
pub use settings::{Difficulty, Mode, Settings, SettingsPatch};
pub use types::{PlayerId, RoomCode};
