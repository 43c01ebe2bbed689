//! Client struct definition
//!
//! Represents a connected client: its player identity and the channel
//! used to push server messages back to its connection handler.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::SendError;
use crate::message::ServerMessage;
use crate::types::PlayerId;

/// Connected client information
///
/// The display name lives in the room's `PlayerSession` (it arrives with
/// `createRoom`/`joinRoom`), so this is just identity plus the outbound
/// channel.
#[derive(Debug)]
pub struct Client {
    /// Unique identifier for this client
    pub id: PlayerId,
    /// Server → Client message channel
    pub sender: mpsc::Sender<ServerMessage>,
}

impl Client {
    /// Create a new client with the given ID and sender channel
    pub fn new(id: PlayerId, sender: mpsc::Sender<ServerMessage>) -> Self {
        Self { id, sender }
    }

    /// Queue a message for this client without waiting
    ///
    /// Sends are fire-and-forget from the actor's point of view: a full
    /// channel (peer stalled on TCP backpressure) or a closed one
    /// (disconnected) drops the message rather than blocking the actor,
    /// so one slow connection can never stall every room.
    pub fn try_send(&self, msg: ServerMessage) -> Result<(), SendError> {
        self.sender.try_send(msg).map_err(|e| match e {
            TrySendError::Full(_) => SendError::ChannelFull,
            TrySendError::Closed(_) => SendError::ChannelClosed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_try_send() {
        let (tx, mut rx) = mpsc::channel(32);
        let client = Client::new(PlayerId::new(), tx);

        client.try_send(ServerMessage::Health { ok: true }).unwrap();

        assert!(matches!(
            rx.try_recv(),
            Ok(ServerMessage::Health { ok: true })
        ));
    }

    #[test]
    fn test_client_try_send_full_channel() {
        let (tx, _rx) = mpsc::channel(1);
        let client = Client::new(PlayerId::new(), tx);

        client.try_send(ServerMessage::Health { ok: true }).unwrap();

        // never-drained channel: the second send drops instead of blocking
        assert!(matches!(
            client.try_send(ServerMessage::Health { ok: true }),
            Err(SendError::ChannelFull)
        ));
    }

    #[test]
    fn test_client_try_send_closed_channel() {
        let (tx, rx) = mpsc::channel(32);
        drop(rx);
        let client = Client::new(PlayerId::new(), tx);

        assert!(matches!(
            client.try_send(ServerMessage::Health { ok: true }),
            Err(SendError::ChannelClosed)
        ));
    }
}
