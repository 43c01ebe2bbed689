//! RaceServer Actor implementation
//!
//! The central actor that owns all state: connected clients, the room
//! registry, and the player-to-room index. Commands arrive over an mpsc
//! channel and are processed one at a time, so each operation's mutation
//! and broadcasts complete before the next command is admitted. That
//! serialization is what upholds the room invariants (host is always a
//! member, settings always fully populated) under concurrent connections.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::client::Client;
use crate::error::AppError;
use crate::message::{RaceResult, ServerMessage};
use crate::room::Room;
use crate::settings::{Settings, SettingsPatch};
use crate::types::{PlayerId, RoomCode};

/// Commands sent from connection handlers to the RaceServer actor
#[derive(Debug)]
pub enum RaceCommand {
    /// New client connected
    Connect {
        player_id: PlayerId,
        sender: mpsc::Sender<ServerMessage>,
    },
    /// Client disconnected (transport-triggered, may race an explicit leave)
    Disconnect {
        player_id: PlayerId,
    },
    /// Create a new room with the caller as host
    CreateRoom {
        player_id: PlayerId,
        name: String,
    },
    /// Join an existing room
    JoinRoom {
        player_id: PlayerId,
        code: String,
        name: String,
    },
    /// Leave a room
    LeaveRoom {
        player_id: PlayerId,
        code: String,
    },
    /// Host-only: shallow-merge a settings patch
    UpdateSettings {
        player_id: PlayerId,
        code: String,
        settings: SettingsPatch,
    },
    /// Host-only: replace settings and start the race
    StartGame {
        player_id: PlayerId,
        code: String,
        settings: Settings,
        text: String,
    },
    /// Record a reported result
    SubmitResult {
        player_id: PlayerId,
        code: String,
        result: RaceResult,
    },
}

/// The main RaceServer actor
///
/// Manages all state and processes commands from connection handlers.
pub struct RaceServer {
    /// All connected clients: PlayerId -> Client
    clients: HashMap<PlayerId, Client>,
    /// Live rooms: RoomCode -> Room. A room is present iff it has at
    /// least one player.
    rooms: HashMap<RoomCode, Room>,
    /// Room each player was last associated with, for disconnect lookup
    player_rooms: HashMap<PlayerId, RoomCode>,
    /// Command receiver channel
    receiver: mpsc::Receiver<RaceCommand>,
}

impl RaceServer {
    /// Create a new RaceServer with the given command receiver
    pub fn new(receiver: mpsc::Receiver<RaceCommand>) -> Self {
        Self {
            clients: HashMap::new(),
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
            receiver,
        }
    }

    /// Run the RaceServer event loop
    ///
    /// Continuously receives and processes commands until all senders are dropped.
    pub async fn run(mut self) {
        info!("RaceServer started");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd).await;
        }

        info!("RaceServer shutting down");
    }

    /// Process a single command
    async fn handle_command(&mut self, cmd: RaceCommand) {
        match cmd {
            RaceCommand::Connect { player_id, sender } => {
                self.handle_connect(player_id, sender).await;
            }
            RaceCommand::Disconnect { player_id } => {
                self.handle_disconnect(player_id).await;
            }
            RaceCommand::CreateRoom { player_id, name } => {
                self.handle_create_room(player_id, name).await;
            }
            RaceCommand::JoinRoom { player_id, code, name } => {
                self.handle_join_room(player_id, code, name).await;
            }
            RaceCommand::LeaveRoom { player_id, code } => {
                self.handle_leave_room(player_id, code).await;
            }
            RaceCommand::UpdateSettings { player_id, code, settings } => {
                self.handle_update_settings(player_id, code, settings).await;
            }
            RaceCommand::StartGame { player_id, code, settings, text } => {
                self.handle_start_game(player_id, code, settings, text).await;
            }
            RaceCommand::SubmitResult { player_id, code, result } => {
                self.handle_submit_result(player_id, code, result).await;
            }
        }
    }

    /// Handle new client connection
    async fn handle_connect(&mut self, player_id: PlayerId, sender: mpsc::Sender<ServerMessage>) {
        info!("Player {} connected", player_id);
        let client = Client::new(player_id, sender);
        self.clients.insert(player_id, client);
        debug!(
            "Total clients: {}, Total rooms: {}",
            self.clients.len(),
            self.rooms.len()
        );
    }

    /// Handle client disconnection
    ///
    /// Runs the same removal path as an explicit leave, keyed off the room
    /// the player was last associated with. Idempotent against a leave
    /// that already went through: the index entry is gone, so nothing
    /// happens.
    async fn handle_disconnect(&mut self, player_id: PlayerId) {
        info!("Player {} disconnected", player_id);

        if let Some(code) = self.player_rooms.remove(&player_id) {
            self.remove_player_from_room(player_id, &code);
        }

        self.clients.remove(&player_id);

        debug!(
            "Total clients: {}, Total rooms: {}",
            self.clients.len(),
            self.rooms.len()
        );
    }

    /// Handle room creation
    async fn handle_create_room(&mut self, player_id: PlayerId, name: String) {
        let Some(client) = self.clients.get(&player_id) else {
            return;
        };

        // Generate a code that is not in use by any live room
        let code = loop {
            let code = RoomCode::generate();
            if !self.rooms.contains_key(&code) {
                break code;
            }
        };

        let room = Room::new(code.clone(), player_id, display_name(name));
        self.rooms.insert(code.clone(), room);
        self.player_rooms.insert(player_id, code.clone());

        info!("Player {} created room {}", player_id, code);

        let _ = client.try_send(ServerMessage::RoomCreated {
            code: code.clone(),
            host_id: player_id,
        });

        self.broadcast_room_state(&code);
    }

    /// Handle room joining
    async fn handle_join_room(&mut self, player_id: PlayerId, code: String, name: String) {
        let Some(client) = self.clients.get(&player_id) else {
            return;
        };

        let code = RoomCode::from_string(code);

        // Check room exists
        let Some(room) = self.rooms.get_mut(&code) else {
            let _ = client.try_send(AppError::RoomNotFound(code.to_string()).into());
            return;
        };

        let host_id = room.host;
        room.add_player(player_id, display_name(name));
        self.player_rooms.insert(player_id, code.clone());

        info!("Player {} joined room {}", player_id, code);

        let _ = client.try_send(ServerMessage::RoomJoined {
            code: code.clone(),
            host_id,
        });

        self.broadcast_room_state(&code);
    }

    /// Handle voluntary room leaving
    async fn handle_leave_room(&mut self, player_id: PlayerId, code: String) {
        let code = RoomCode::from_string(code);

        if self.player_rooms.get(&player_id) == Some(&code) {
            self.player_rooms.remove(&player_id);
        }

        info!("Player {} left room {}", player_id, code);

        self.remove_player_from_room(player_id, &code);
    }

    /// Handle a host's settings patch
    ///
    /// Silently dropped unless the caller is the current host.
    async fn handle_update_settings(
        &mut self,
        player_id: PlayerId,
        code: String,
        settings: SettingsPatch,
    ) {
        let code = RoomCode::from_string(code);

        let Some(room) = self.rooms.get_mut(&code) else {
            return;
        };
        if room.host != player_id {
            debug!("Player {} is not host of {}, settings update dropped", player_id, code);
            return;
        }

        room.settings.merge(settings);

        self.broadcast_room_state(&code);
    }

    /// Handle a host starting the race
    ///
    /// Settings are replaced wholesale here, unlike the merge in
    /// `handle_update_settings`. Silently dropped unless the caller is
    /// the current host.
    async fn handle_start_game(
        &mut self,
        player_id: PlayerId,
        code: String,
        settings: Settings,
        text: String,
    ) {
        let code = RoomCode::from_string(code);

        let Some(room) = self.rooms.get_mut(&code) else {
            return;
        };
        if room.host != player_id {
            debug!("Player {} is not host of {}, start dropped", player_id, code);
            return;
        }

        room.start(settings.clone(), text.clone());

        info!("Room {} started a race", code);

        let Some(room) = self.rooms.get(&code) else {
            return;
        };
        self.send_to_room(room, ServerMessage::GameStarted { text, settings });

        self.broadcast_room_state(&code);
    }

    /// Handle a reported result
    ///
    /// Only records for current members; the value itself is not
    /// validated. Triggers a leaderboard-only broadcast.
    async fn handle_submit_result(
        &mut self,
        player_id: PlayerId,
        code: String,
        result: RaceResult,
    ) {
        let code = RoomCode::from_string(code);

        let Some(room) = self.rooms.get_mut(&code) else {
            return;
        };
        if !room.set_result(player_id, result) {
            return;
        }

        debug!("Player {} submitted a result in {}", player_id, code);

        self.broadcast_leaderboard(&code);
    }

    /// Helper: remove a player from a room and handle cleanup
    ///
    /// Shared by leave and disconnect. A player that is no longer a
    /// member is a silent no-op, so the second of a racing leave and
    /// disconnect never deletes a room or migrates the host twice.
    fn remove_player_from_room(&mut self, player_id: PlayerId, code: &RoomCode) {
        let Some(room) = self.rooms.get_mut(code) else {
            return;
        };

        if !room.remove_player(player_id) {
            return;
        }

        if room.is_empty() {
            self.rooms.remove(code);
            debug!("Room {} deleted (empty)", code);
            return;
        }

        self.broadcast_room_state(code);
    }

    /// Broadcast the full room snapshot, followed by the leaderboard
    ///
    /// Every full snapshot carries a leaderboard refresh with it, so
    /// clients can render both from either event stream.
    fn broadcast_room_state(&self, code: &RoomCode) {
        let Some(room) = self.rooms.get(code) else {
            return;
        };

        let state = ServerMessage::RoomState {
            code: room.code.clone(),
            host_id: room.host,
            settings: room.settings.clone(),
            started: room.started,
            players: room.player_states(),
        };
        self.send_to_room(room, state);

        self.send_to_room(
            room,
            ServerMessage::Leaderboard {
                players: room.leaderboard(),
            },
        );
    }

    /// Broadcast only the leaderboard for a room
    fn broadcast_leaderboard(&self, code: &RoomCode) {
        let Some(room) = self.rooms.get(code) else {
            return;
        };
        self.send_to_room(
            room,
            ServerMessage::Leaderboard {
                players: room.leaderboard(),
            },
        );
    }

    /// Helper: fan a message out to every member of a room
    ///
    /// Fire-and-forget; a member whose channel is full or gone just
    /// misses the message, it never stalls the actor.
    fn send_to_room(&self, room: &Room, msg: ServerMessage) {
        for player_id in room.player_ids() {
            if let Some(client) = self.clients.get(&player_id) {
                let _ = client.try_send(msg.clone());
            }
        }
    }
}

/// Fall back to a placeholder for an empty display name
fn display_name(name: String) -> String {
    if name.is_empty() {
        "Player".to_string()
    } else {
        name
    }
}
