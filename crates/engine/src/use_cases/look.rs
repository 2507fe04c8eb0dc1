//! Look use cases: describing the current room and examining one thing in it.

use std::sync::Arc;

use mudlark_domain::{find_named, Exit, Message, PlayerId};

use super::presence::{exits_from, load_actor, load_room, occupants};
use super::{Advisory, LookupError};
use crate::infrastructure::ports::{ConnectionRepo, PlayerRepo, RepoError, RoomRepo};

/// Container for look use cases.
pub struct LookUseCases {
    pub describe_room: Arc<DescribeRoom>,
    pub look_at: Arc<LookAt>,
}

impl LookUseCases {
    pub fn new(describe_room: Arc<DescribeRoom>, look_at: Arc<LookAt>) -> Self {
        Self {
            describe_room,
            look_at,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookError {
    #[error("You don't see {0} here.")]
    NotFound(String),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl Advisory for LookError {
    fn repo_error(&self) -> Option<&RepoError> {
        match self {
            Self::Repo(e) => Some(e),
            Self::Lookup(e) => e.repo_error(),
            _ => None,
        }
    }

    fn to_origin(&self) -> bool {
        matches!(self, Self::Lookup(e) if e.to_origin())
    }
}

/// Room description shown by `LOOK`.
///
/// Exit numbers come from the same ordering `GO`, `OPEN` and `@DOOR` use.
/// Closed exits keep their number so they can still be opened.
pub struct DescribeRoom {
    players: Arc<dyn PlayerRepo>,
    rooms: Arc<dyn RoomRepo>,
    connections: Arc<dyn ConnectionRepo>,
}

impl DescribeRoom {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        rooms: Arc<dyn RoomRepo>,
        connections: Arc<dyn ConnectionRepo>,
    ) -> Self {
        Self {
            players,
            rooms,
            connections,
        }
    }

    pub async fn execute(&self, actor_id: PlayerId) -> Result<Vec<Message>, LookError> {
        let actor = load_actor(self.players.as_ref(), actor_id).await?;
        let Some(room_id) = actor.current_room_id else {
            return Ok(vec![Message::to(
                actor.id,
                "<INFO>You are floating in the void. Use @DIG to create a room.</INFO>",
            )]);
        };
        let room = load_room(self.rooms.as_ref(), room_id).await?;

        let mut text = format!("<STRONG>{}</STRONG>\n{}\n", room.name, room.description);

        text.push_str("Items:\n");
        if room.items.is_empty() {
            text.push_str("nothing\n");
        }
        for (index, item) in room.items.iter().enumerate() {
            text.push_str(&format!("<ITEM>{index}. {}</ITEM>\n", item.name));
        }

        text.push_str("Exits:\n");
        let exits = exits_from(self.connections.as_ref(), room.id).await?;
        if exits.is_empty() {
            text.push_str("none\n");
        }
        for exit in &exits {
            text.push_str(&self.exit_line(exit).await?);
            text.push('\n');
        }

        text.push_str("Players:\n");
        let others: Vec<String> = occupants(self.players.as_ref(), room.id)
            .await?
            .into_iter()
            .filter(|p| p.id != actor.id)
            .map(|p| format!("<PLAYER>{}</PLAYER>", p.name))
            .collect();
        if others.is_empty() {
            text.push_str("nobody");
        } else {
            text.push_str(&others.join("\n"));
        }

        Ok(vec![Message::to(actor.id, text)])
    }

    async fn exit_line(&self, exit: &Exit) -> Result<String, RepoError> {
        let target = match self.rooms.get(exit.target).await? {
            Some(room) => room.name,
            None => "an unknown place".to_string(),
        };
        let mut line = format!("<EXIT>{}. {}</EXIT>", exit.index, target);
        if !exit.is_open() {
            line.push_str(&format!(
                " - blocked by a closed {}",
                exit.connection.display_name()
            ));
        }
        Ok(line)
    }
}

/// Examine one thing by name: inventory first, then the room's items, then
/// the other players present. The first hit wins.
pub struct LookAt {
    players: Arc<dyn PlayerRepo>,
    rooms: Arc<dyn RoomRepo>,
}

impl LookAt {
    pub fn new(players: Arc<dyn PlayerRepo>, rooms: Arc<dyn RoomRepo>) -> Self {
        Self { players, rooms }
    }

    pub async fn execute(&self, actor_id: PlayerId, name: &str) -> Result<Vec<Message>, LookError> {
        let actor = load_actor(self.players.as_ref(), actor_id).await?;

        if let Some(item) = find_named(&actor.inventory, name) {
            return Ok(vec![Message::to(
                actor.id,
                format!("<ITEM>{}</ITEM>: {}", item.name, item.description),
            )]);
        }

        let Some(room_id) = actor.current_room_id else {
            return Err(LookError::NotFound(name.to_string()));
        };

        let room = load_room(self.rooms.as_ref(), room_id).await?;
        if let Some(item) = find_named(&room.items, name) {
            return Ok(vec![Message::to(
                actor.id,
                format!("<ITEM>{}</ITEM>: {}", item.name, item.description),
            )]);
        }

        let present = occupants(self.players.as_ref(), room_id).await?;
        match present
            .iter()
            .find(|p| p.id != actor.id && p.is_named(name))
        {
            Some(other) => Ok(vec![
                Message::to(
                    actor.id,
                    format!("<ACTION>You look at <PLAYER>{}</PLAYER>.</ACTION>", other.name),
                ),
                Message::to(
                    other.id,
                    format!("<INFO><PLAYER>{}</PLAYER> is looking at you.</INFO>", actor.name),
                ),
            ]),
            None => Err(LookError::NotFound(name.to_string())),
        }
    }
}
