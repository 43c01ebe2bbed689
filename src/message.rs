//! Message protocol definitions
//!
//! JSON-based bidirectional message protocol using Serde's tagged enum
//! for type-safe serialization/deserialization. Event and field names are
//! camelCase on the wire (`createRoom`, `roomState`, `hostId`, ...).

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::settings::{Settings, SettingsPatch};
use crate::types::{PlayerId, RoomCode};

/// A finished race result as reported by the client
///
/// Not validated by the server; the leaderboard takes it at face value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub wpm: f64,
    pub accuracy: f64,
    pub chars: u32,
    pub errors: u32,
}

/// One player's entry in a `roomState` or `leaderboard` payload
#[derive(Debug, Clone, Serialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub result: Option<RaceResult>,
}

/// Client → Server message
///
/// All messages from client to server. Uses tagged enum with camelCase naming.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Create a new room with the caller as host
    CreateRoom { name: String },
    /// Join an existing room by code
    JoinRoom { code: String, name: String },
    /// Leave the given room
    LeaveRoom { code: String },
    /// Host-only: shallow-merge a settings patch
    UpdateSettings { code: String, settings: SettingsPatch },
    /// Host-only: replace settings, store text, start the race
    StartGame {
        code: String,
        settings: Settings,
        text: String,
    },
    /// Report a finished race result
    SubmitResult {
        code: String,
        wpm: f64,
        accuracy: f64,
        chars: u32,
        errors: u32,
    },
    /// Liveness probe, answered at the transport boundary
    Health,
}

/// Server → Client message
///
/// All messages from server to client. Uses tagged enum with camelCase naming.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Connection successful, player ID issued
    Connected { player_id: PlayerId },
    /// Room created successfully (sent to the creator only)
    RoomCreated { code: RoomCode, host_id: PlayerId },
    /// Room joined successfully (sent to the joiner only)
    RoomJoined { code: RoomCode, host_id: PlayerId },
    /// Operation failed (sent to the failing caller only)
    RoomError { message: String },
    /// Full room snapshot, players in join order (sent to all members)
    RoomState {
        code: RoomCode,
        host_id: PlayerId,
        settings: Settings,
        started: bool,
        players: Vec<PlayerState>,
    },
    /// Race started (sent to all members)
    GameStarted { text: String, settings: Settings },
    /// Results sorted by wpm descending (sent to all members)
    Leaderboard { players: Vec<PlayerState> },
    /// Liveness probe response
    Health { ok: bool },
}

/// Convert AppError to ServerMessage for client notification
impl From<AppError> for ServerMessage {
    fn from(err: AppError) -> Self {
        let message = match &err {
            AppError::RoomNotFound(_) => "Room not found".to_string(),
            // Fatal errors are not typically converted (connection closes)
            _ => "Internal error".to_string(),
        };
        ServerMessage::RoomError { message }
    }
}
