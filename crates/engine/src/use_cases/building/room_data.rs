//! Technical room dump for builders (`@DESCRIBE`). Shows the ids needed by
//! `@TELEPORT`.

use std::sync::Arc;

use mudlark_domain::{Message, PlayerId};

use super::BuildError;
use crate::infrastructure::ports::{ConnectionRepo, PlayerRepo, RoomRepo};
use crate::use_cases::presence::{current_room, exits_from, load_actor};

pub struct RoomData {
    players: Arc<dyn PlayerRepo>,
    rooms: Arc<dyn RoomRepo>,
    connections: Arc<dyn ConnectionRepo>,
}

impl RoomData {
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

    pub async fn execute(&self, actor_id: PlayerId) -> Result<Vec<Message>, BuildError> {
        let actor = load_actor(self.players.as_ref(), actor_id).await?;
        let room = current_room(self.rooms.as_ref(), &actor).await?;

        let creator = match self.players.get(room.creator_id).await? {
            Some(player) => player.name,
            None => "unknown".to_string(),
        };
        let connections: Vec<String> = exits_from(self.connections.as_ref(), room.id)
            .await?
            .iter()
            .map(|exit| exit.connection.id.to_string())
            .collect();
        let connections = if connections.is_empty() {
            "none".to_string()
        } else {
            connections.join(", ")
        };

        Ok(vec![Message::to(
            actor.id,
            format!(
                "<STRONG>Room data</STRONG>\nid: {}\ncreator: {} ({})\nname: {}\ndescription: {}\nconnections: {}",
                room.id, creator, room.creator_id, room.name, room.description, connections
            ),
        )])
    }
}
