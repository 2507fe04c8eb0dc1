//! Session routing for WebSocket clients.
//!
//! One session per live transport connection. A session starts anonymous and
//! may be bound to a player identity exactly once. Outbound messages are
//! routed by recipient: addressed messages go to every session bound to that
//! player, unaddressed ones go back to the session the command came from.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use mudlark_domain::{Message, PlayerId, SessionId};
use mudlark_shared::ServerMessage;

use crate::infrastructure::ports::SessionPresence;

/// Shared router handle for handlers.
pub type SharedSessionRouter = Arc<SessionRouter>;

struct SessionEntry {
    transport_id: Uuid,
    player_id: Option<PlayerId>,
    sender: mpsc::Sender<ServerMessage>,
}

/// Bidirectional index: session -> entry, transport -> session and
/// player -> sessions.
#[derive(Default)]
struct SessionIndex {
    sessions: HashMap<SessionId, SessionEntry>,
    by_transport: HashMap<Uuid, SessionId>,
    by_player: HashMap<PlayerId, Vec<SessionId>>,
}

/// What [`SessionRouter::remove_session`] removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedSession {
    pub player_id: Option<PlayerId>,
    /// No other live session holds `player_id`
    pub was_last_for_player: bool,
}

/// Manages all live sessions.
#[derive(Default)]
pub struct SessionRouter {
    index: RwLock<SessionIndex>,
}

impl SessionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh anonymous session for `transport_id`.
    pub async fn add_session(
        &self,
        transport_id: Uuid,
        sender: mpsc::Sender<ServerMessage>,
    ) -> Result<SessionId, SessionError> {
        let mut index = self.index.write().await;
        if index.by_transport.contains_key(&transport_id) {
            return Err(SessionError::AlreadyRegistered(transport_id));
        }

        let session_id = SessionId::new();
        index.sessions.insert(
            session_id,
            SessionEntry {
                transport_id,
                player_id: None,
                sender,
            },
        );
        index.by_transport.insert(transport_id, session_id);
        tracing::info!(session_id = %session_id, transport_id = %transport_id, "Session added");
        Ok(session_id)
    }

    /// Bind `player_id` to the session. First bind wins: any failure leaves
    /// the session untouched and is only logged.
    pub async fn set_identity(
        &self,
        session_id: SessionId,
        transport_id: Uuid,
        player_id: PlayerId,
    ) -> Result<(), SessionError> {
        let mut index = self.index.write().await;
        let result = match index.sessions.get_mut(&session_id) {
            None => Err(SessionError::NotFound(session_id)),
            Some(entry) if entry.transport_id != transport_id => {
                Err(SessionError::TransportMismatch(session_id))
            }
            Some(entry) => match entry.player_id {
                Some(bound) => Err(SessionError::AlreadyBound { session_id, bound }),
                None => {
                    entry.player_id = Some(player_id);
                    Ok(())
                }
            },
        };

        match &result {
            Ok(()) => {
                index.by_player.entry(player_id).or_default().push(session_id);
                tracing::info!(session_id = %session_id, player_id = %player_id, "Session identified");
            }
            Err(e) => {
                tracing::warn!(session_id = %session_id, player_id = %player_id, error = %e, "Identity not bound");
            }
        }
        result
    }

    /// The player bound to `session_id`, if any.
    pub async fn identity(&self, session_id: SessionId) -> Option<PlayerId> {
        let index = self.index.read().await;
        index.sessions.get(&session_id).and_then(|e| e.player_id)
    }

    /// Remove a session. Returns `None` if it was already gone.
    pub async fn remove_session(&self, session_id: SessionId) -> Option<RemovedSession> {
        let mut index = self.index.write().await;
        let entry = index.sessions.remove(&session_id)?;
        index.by_transport.remove(&entry.transport_id);

        let mut was_last_for_player = false;
        if let Some(player_id) = entry.player_id {
            if let Some(sessions) = index.by_player.get_mut(&player_id) {
                sessions.retain(|id| *id != session_id);
                if sessions.is_empty() {
                    index.by_player.remove(&player_id);
                    was_last_for_player = true;
                }
            }
        }

        tracing::info!(session_id = %session_id, player_id = ?entry.player_id, "Session removed");
        Some(RemovedSession {
            player_id: entry.player_id,
            was_last_for_player,
        })
    }

    /// Send a frame to one session.
    pub async fn send_to_session(&self, session_id: SessionId, message: ServerMessage) {
        let index = self.index.read().await;
        if let Some(entry) = index.sessions.get(&session_id) {
            send(session_id, &entry.sender, message);
        }
    }

    /// Route the messages produced by a command issued from `origin`.
    ///
    /// Messages for players with no live session are dropped.
    pub async fn dispatch(&self, origin: SessionId, messages: Vec<Message>) {
        let index = self.index.read().await;
        for message in messages {
            let frame = ServerMessage::text(message.recipient.map(Into::into), message.body);
            match message.recipient {
                None => {
                    if let Some(entry) = index.sessions.get(&origin) {
                        send(origin, &entry.sender, frame);
                    }
                }
                Some(player_id) => {
                    let Some(targets) = index.by_player.get(&player_id) else {
                        tracing::debug!(player_id = %player_id, "No live session for recipient, dropping message");
                        continue;
                    };
                    for session_id in targets {
                        if let Some(entry) = index.sessions.get(session_id) {
                            send(*session_id, &entry.sender, frame.clone());
                        }
                    }
                }
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.index.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionPresence for SessionRouter {
    async fn is_connected(&self, player_id: PlayerId) -> bool {
        self.index.read().await.by_player.contains_key(&player_id)
    }
}

fn send(session_id: SessionId, sender: &mpsc::Sender<ServerMessage>, message: ServerMessage) {
    if let Err(e) = sender.try_send(message) {
        tracing::warn!(session_id = %session_id, error = %e, "Failed to send to session");
    }
}

/// Errors that can occur during session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Transport {0} already has a session")]
    AlreadyRegistered(Uuid),
    #[error("Session {0} not found")]
    NotFound(SessionId),
    #[error("Session {0} belongs to a different transport")]
    TransportMismatch(SessionId),
    #[error("Session {session_id} is already bound to player {bound}")]
    AlreadyBound {
        session_id: SessionId,
        bound: PlayerId,
    },
}
