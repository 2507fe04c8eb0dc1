//! WebSocket handling for game clients.
//!
//! Each connection gets a session, a `SessionMessage` carrying its id, and
//! the welcome banner. After that every inbound `Message` frame is one
//! command line. Pings are answered by axum itself.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message as WsFrame, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use mudlark_domain::command::WELCOME_TEXT;
use mudlark_domain::{Message, PlayerId, SessionId};
use mudlark_shared::{ClientMessage, ServerMessage};

use super::sessions::SharedSessionRouter;
use crate::app::App;
use crate::interpreter::Interpreter;

/// Combined state for WebSocket handlers.
pub struct WsState {
    pub app: Arc<App>,
    pub interpreter: Interpreter,
    pub sessions: SharedSessionRouter,
    /// Per-connection outbound buffer
    pub channel_buffer: usize,
}

impl WsState {
    pub fn new(app: Arc<App>, sessions: SharedSessionRouter, channel_buffer: usize) -> Self {
        Self {
            interpreter: Interpreter::new(app.clone()),
            app,
            sessions,
            channel_buffer,
        }
    }
}

/// WebSocket upgrade handler - entry point for new connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<WsState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let transport_id = Uuid::new_v4();

    // Bounded channel drained into the socket by the send task
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(state.channel_buffer);

    let session_id = match state.sessions.add_session(transport_id, tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(transport_id = %transport_id, error = %e, "Could not open session");
            return;
        }
    };

    tracing::info!(session_id = %session_id, "WebSocket connection established");

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_sender.send(WsFrame::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::error!(error = %e, "Failed to serialize server message"),
            }
        }
    });

    state
        .sessions
        .send_to_session(
            session_id,
            ServerMessage::SessionMessage {
                session_id: session_id.to_uuid(),
            },
        )
        .await;
    state
        .sessions
        .send_to_session(session_id, ServerMessage::text(None, WELCOME_TEXT))
        .await;

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(WsFrame::Text(text)) => {
                handle_text(&state, session_id, transport_id, text.as_str()).await;
            }
            Ok(WsFrame::Close(_)) => {
                tracing::info!(session_id = %session_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    disconnect(&state, session_id).await;
    send_task.abort();

    tracing::info!(session_id = %session_id, "WebSocket connection terminated");
}

async fn handle_text(state: &WsState, session_id: SessionId, transport_id: Uuid, text: &str) {
    let line = match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Message { player_id, message }) => {
            if player_id.is_some_and(|id| id != session_id.to_uuid()) {
                tracing::debug!(session_id = %session_id, "Ignoring mismatched playerID on inbound frame");
            }
            message
        }
        Ok(ClientMessage::Unknown) => {
            tracing::warn!(session_id = %session_id, "Unknown message type");
            reject_frame(state, session_id).await;
            return;
        }
        Err(e) => {
            tracing::warn!(session_id = %session_id, error = %e, "Failed to parse message");
            reject_frame(state, session_id).await;
            return;
        }
    };

    // The bound identity is authoritative, never the client's claim.
    let actor = state.sessions.identity(session_id).await;
    let outcome = state.interpreter.interpret(&line, actor).await;

    if let Some(player_id) = outcome.authenticated {
        bind(state, session_id, transport_id, player_id).await;
    }
    state.sessions.dispatch(session_id, outcome.messages).await;
}

/// Bind the session to `player_id`, then make sure a logout from the
/// player's previous session did not slip in after the login marked them
/// online.
async fn bind(state: &WsState, session_id: SessionId, transport_id: Uuid, player_id: PlayerId) {
    // Failures are logged by the router and leave the session as it was.
    if state
        .sessions
        .set_identity(session_id, transport_id, player_id)
        .await
        .is_err()
    {
        return;
    }
    if let Err(e) = state.app.use_cases.account.login.keep_online(player_id).await {
        tracing::warn!(session_id = %session_id, player_id = %player_id, error = %e, "Could not confirm player online");
    }
}

async fn reject_frame(state: &WsState, session_id: SessionId) {
    let warning = Message::warning(None, "Could not understand that message.");
    state
        .sessions
        .send_to_session(session_id, ServerMessage::text(None, warning.body))
        .await;
}

/// Drop the session, and log the player out if this was their last one.
async fn disconnect(state: &WsState, session_id: SessionId) {
    let Some(removed) = state.sessions.remove_session(session_id).await else {
        return;
    };
    let Some(player_id) = removed.player_id else {
        return;
    };
    if !removed.was_last_for_player {
        return;
    }
    log_out(state, session_id, player_id).await;
}

/// Log the player out unless another session has bound them meanwhile.
async fn log_out(state: &WsState, session_id: SessionId, player_id: PlayerId) {
    let logout = &state.app.use_cases.account.logout;
    match logout.execute(player_id, state.sessions.as_ref()).await {
        Ok(messages) => state.sessions.dispatch(session_id, messages).await,
        Err(e) => {
            tracing::warn!(session_id = %session_id, player_id = %player_id, error = %e, "Logout failed");
        }
    }
}
