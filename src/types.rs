//! Basic type definitions for the race server
//!
//! Provides newtype wrappers for type safety:
//! - `PlayerId`: UUID-based unique player identifier
//! - `RoomCode`: 5-character human-typeable room code

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique player identifier (newtype pattern)
///
/// Wraps a UUID v4, minted per connection by the transport layer.
/// Kept distinct from the raw connection handle so the room model
/// does not have to change if sessions ever outlive connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Create a new random player ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Alphabet for room codes: uppercase letters and digits, with the
/// visually ambiguous I, O, 0 and 1 removed.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Number of characters in a room code
const CODE_LEN: usize = 5;

/// Room code (5-character, human-enterable)
///
/// Identifies a live race room. Generated randomly on room creation;
/// uniqueness against live rooms is enforced by the server's
/// regenerate-on-collision loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomCode(pub String);

impl RoomCode {
    /// Generate a new random 5-character room code
    pub fn generate() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let code: String = (0..CODE_LEN)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Create a RoomCode from user input (converts to uppercase)
    pub fn from_string(code: String) -> Self {
        Self(code.to_uppercase())
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
