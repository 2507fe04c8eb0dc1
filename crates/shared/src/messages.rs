//! WebSocket message types for server-client communication
//!
//! Every frame is a JSON object with a `type` discriminator. The same
//! `Message` shape is used in both directions.
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Renaming variants or fields is a breaking change
//! - Unknown inbound variants deserialize to `Unknown`

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Client Messages (browser → server)
// =============================================================================

/// Messages from client to server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// A raw command line
    Message {
        /// The client's session id, not its player id
        #[serde(rename = "playerID", default)]
        player_id: Option<Uuid>,
        message: String,
    },
    /// Unknown message type for forward compatibility
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Server Messages (server → browser)
// =============================================================================

/// Messages from server to client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Sent once, right after the connection is accepted
    SessionMessage {
        #[serde(rename = "sessionID")]
        session_id: Uuid,
    },
    /// Narrative output. `player_id` is `None` for session-scoped text.
    Message {
        #[serde(rename = "playerID")]
        player_id: Option<Uuid>,
        message: String,
    },
}

impl ServerMessage {
    pub fn text(player_id: Option<Uuid>, message: impl Into<String>) -> Self {
        ServerMessage::Message {
            player_id,
            message: message.into(),
        }
    }
}
