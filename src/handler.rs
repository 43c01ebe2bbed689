//! WebSocket connection handler
//!
//! Handles individual client connections: WebSocket handshake,
//! message parsing, and bidirectional communication with the RaceServer.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use crate::error::AppError;
use crate::message::{ClientMessage, RaceResult, ServerMessage};
use crate::server::RaceCommand;
use crate::types::PlayerId;

/// Handle a new TCP connection
///
/// Performs WebSocket handshake, mints the connection's PlayerId, sets up
/// bidirectional communication, and manages the connection lifecycle.
/// On teardown a Disconnect command is issued, which the server treats
/// the same as an explicit leave.
pub async fn handle_connection(
    stream: TcpStream,
    cmd_tx: mpsc::Sender<RaceCommand>,
) -> Result<(), AppError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    debug!("New TCP connection from {}", peer_addr);

    // WebSocket handshake
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Player identity for the lifetime of this connection
    let player_id = PlayerId::new();
    info!("Player {} connected from {}", player_id, peer_addr);

    // Create channel for server -> client messages
    let (msg_tx, mut msg_rx) = mpsc::channel::<ServerMessage>(32);

    // The read task answers liveness probes directly on this channel
    let msg_tx_read = msg_tx.clone();

    // Register with RaceServer
    if cmd_tx
        .send(RaceCommand::Connect {
            player_id,
            sender: msg_tx,
        })
        .await
        .is_err()
    {
        error!("Failed to register player {} - server closed", player_id);
        return Err(AppError::ChannelSend);
    }

    // Send connection success message with the assigned identity
    let connected_msg = ServerMessage::Connected { player_id };
    let json = serde_json::to_string(&connected_msg)?;
    ws_sender.send(Message::Text(json.into())).await?;

    // Clone cmd_tx for read task
    let cmd_tx_read = cmd_tx.clone();

    // Spawn read task (WebSocket -> RaceCommand)
    let read_task = tokio::spawn(async move {
        while let Some(msg_result) = ws_receiver.next().await {
            match msg_result {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => match client_message_to_command(player_id, client_msg) {
                            Some(cmd) => {
                                if cmd_tx_read.send(cmd).await.is_err() {
                                    debug!("Server closed, ending read task for {}", player_id);
                                    break;
                                }
                            }
                            None => {
                                // Liveness probe, answered without entering the actor
                                if msg_tx_read
                                    .send(ServerMessage::Health { ok: true })
                                    .await
                                    .is_err()
                                {
                                    break;
                                }
                            }
                        },
                        Err(e) => {
                            warn!("Invalid JSON from {}: {}", player_id, e);
                        }
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("Player {} sent close frame", player_id);
                    break;
                }
                Ok(Message::Ping(data)) => {
                    debug!("Ping from {}", player_id);
                    // Pong is handled automatically by tungstenite
                    let _ = data;
                }
                Ok(Message::Pong(_)) => {
                    debug!("Pong from {}", player_id);
                }
                Ok(_) => {
                    // Binary or other message types - ignore
                }
                Err(e) => {
                    error!("WebSocket error for {}: {}", player_id, e);
                    break;
                }
            }
        }
        debug!("Read task ended for {}", player_id);
    });

    // Spawn write task (ServerMessage -> WebSocket)
    let write_task = tokio::spawn(async move {
        while let Some(msg) = msg_rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        debug!("WebSocket send failed, ending write task");
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to serialize message: {}", e);
                    // Continue - don't break on serialization errors
                }
            }
        }
        debug!("Write task ended for client");

        // Send close frame when done
        let _ = ws_sender.close().await;
    });

    // Wait for either task to complete
    tokio::select! {
        _ = read_task => {
            debug!("Read task completed for {}", player_id);
        }
        _ = write_task => {
            debug!("Write task completed for {}", player_id);
        }
    }

    // Send disconnect command
    let _ = cmd_tx.send(RaceCommand::Disconnect { player_id }).await;

    info!("Player {} disconnected", player_id);

    Ok(())
}

/// Convert a ClientMessage to a RaceCommand
///
/// Returns None for the liveness probe, which never reaches the actor.
fn client_message_to_command(player_id: PlayerId, msg: ClientMessage) -> Option<RaceCommand> {
    let cmd = match msg {
        ClientMessage::CreateRoom { name } => RaceCommand::CreateRoom { player_id, name },
        ClientMessage::JoinRoom { code, name } => RaceCommand::JoinRoom { player_id, code, name },
        ClientMessage::LeaveRoom { code } => RaceCommand::LeaveRoom { player_id, code },
        ClientMessage::UpdateSettings { code, settings } => RaceCommand::UpdateSettings {
            player_id,
            code,
            settings,
        },
        ClientMessage::StartGame { code, settings, text } => RaceCommand::StartGame {
            player_id,
            code,
            settings,
            text,
        },
        ClientMessage::SubmitResult {
            code,
            wpm,
            accuracy,
            chars,
            errors,
        } => RaceCommand::SubmitResult {
            player_id,
            code,
            result: RaceResult {
                wpm,
                accuracy,
                chars,
                errors,
            },
        },
        ClientMessage::Health => return None,
    };
    Some(cmd)
}
