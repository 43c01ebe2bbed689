//! Room struct definition
//!
//! A race room: insertion-ordered membership, host authority, settings,
//! the started flag, the race text, and per-player results.

use crate::message::{PlayerState, RaceResult};
use crate::settings::Settings;
use crate::types::{PlayerId, RoomCode};

/// One player's membership in a room
///
/// Created on create/join, destroyed on leave/disconnect. The result is
/// absent until the player submits one for the current race.
#[derive(Debug)]
pub struct PlayerSession {
    pub id: PlayerId,
    pub name: String,
    pub result: Option<RaceResult>,
}

/// A multiplayer race room
///
/// Membership is kept as a Vec in join order; host migration always picks
/// the earliest-inserted remaining player, so the tie-break is
/// deterministic rather than an artifact of map iteration order.
#[derive(Debug)]
pub struct Room {
    /// Room code for identification
    pub code: RoomCode,
    /// Current host (creator, or migrated on departure)
    pub host: PlayerId,
    /// Race settings, always fully populated
    pub settings: Settings,
    /// Lobby → InProgress flag; never transitions back
    pub started: bool,
    /// Text of the current race, absent until the first start
    pub text: Option<String>,
    /// Members in join order
    players: Vec<PlayerSession>,
}

impl Room {
    /// Create a new room with the given code and the creator as sole
    /// player and host
    pub fn new(code: RoomCode, host_id: PlayerId, host_name: String) -> Self {
        Self {
            code,
            host: host_id,
            settings: Settings::default(),
            started: false,
            text: None,
            players: vec![PlayerSession {
                id: host_id,
                name: host_name,
                result: None,
            }],
        }
    }

    /// Check if a player is a member of this room
    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    /// Check if the room has no members left
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Get the number of members in the room
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Add a player to the end of the membership list, with no result
    ///
    /// A join for an id that is already a member refreshes that session
    /// in place (name updated, result cleared) instead of appending, so
    /// membership never holds two sessions for one player.
    pub fn add_player(&mut self, player_id: PlayerId, name: String) {
        if let Some(player) = self.players.iter_mut().find(|p| p.id == player_id) {
            player.name = name;
            player.result = None;
            return;
        }
        self.players.push(PlayerSession {
            id: player_id,
            name,
            result: None,
        });
    }

    /// Remove a player from the room (handle leaving)
    ///
    /// Returns false if the player was not a member (stale leave racing a
    /// disconnect). If the departing player was host and others remain,
    /// the earliest-joined remaining player becomes host.
    pub fn remove_player(&mut self, player_id: PlayerId) -> bool {
        let Some(pos) = self.players.iter().position(|p| p.id == player_id) else {
            return false;
        };
        self.players.remove(pos);

        if self.host == player_id {
            if let Some(next) = self.players.first() {
                self.host = next.id;
            }
        }
        true
    }

    /// Record a player's reported result
    ///
    /// Returns false if the player is not a member. The value is taken as
    /// reported; there is no range check and no started check.
    pub fn set_result(&mut self, player_id: PlayerId, result: RaceResult) -> bool {
        let Some(player) = self.players.iter_mut().find(|p| p.id == player_id) else {
            return false;
        };
        player.result = Some(result);
        true
    }

    /// Start a race: replace settings wholesale, store the text, clear
    /// every player's result
    ///
    /// Note this replaces rather than merges, unlike `Settings::merge`
    /// used for lobby updates.
    pub fn start(&mut self, settings: Settings, text: String) {
        self.settings = settings;
        self.started = true;
        self.text = Some(text);
        for player in &mut self.players {
            player.result = None;
        }
    }

    /// Iterate member ids in join order
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    /// Snapshot the membership in join order
    pub fn player_states(&self) -> Vec<PlayerState> {
        self.players
            .iter()
            .map(|p| PlayerState {
                id: p.id,
                name: p.name.clone(),
                result: p.result.clone(),
            })
            .collect()
    }

    /// Derive the leaderboard: players sorted by wpm descending
    ///
    /// A player with no result counts as 0 wpm. The sort is stable, so
    /// ties keep join order.
    pub fn leaderboard(&self) -> Vec<PlayerState> {
        let mut players = self.player_states();
        players.sort_by(|a, b| {
            let a_wpm = a.result.as_ref().map_or(0.0, |r| r.wpm);
            let b_wpm = b.result.as_ref().map_or(0.0, |r| r.wpm);
            b_wpm.total_cmp(&a_wpm)
        });
        players
    }
}
