//! Go use case.
//!
//! Walks the actor through a numbered exit of their current room. The
//! numbering is the one `LOOK` shows.

use std::sync::Arc;

use mudlark_domain::{parse_exit_index, Message, PlayerId};

use super::MovementError;
use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::ports::{ConnectionRepo, PlayerRepo, RoomRepo};
use crate::use_cases::presence::{exits_from, load_actor, load_room, relocate};
use crate::use_cases::LookupError;

pub struct Go {
    players: Arc<dyn PlayerRepo>,
    rooms: Arc<dyn RoomRepo>,
    connections: Arc<dyn ConnectionRepo>,
    locks: Arc<EntityLocks>,
}

impl Go {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        rooms: Arc<dyn RoomRepo>,
        connections: Arc<dyn ConnectionRepo>,
        locks: Arc<EntityLocks>,
    ) -> Self {
        Self {
            players,
            rooms,
            connections,
            locks,
        }
    }

    pub async fn execute(&self, actor_id: PlayerId, exit: &str) -> Result<Vec<Message>, MovementError> {
        let index =
            parse_exit_index(exit).ok_or_else(|| MovementError::NotANumber(exit.to_string()))?;

        let _guard = self.locks.lock(actor_id).await;
        let actor = load_actor(self.players.as_ref(), actor_id).await?;
        let here = actor.current_room_id.ok_or(LookupError::InVoid)?;

        let exit = exits_from(self.connections.as_ref(), here)
            .await?
            .into_iter()
            .nth(index)
            .ok_or(MovementError::NoSuchExit(index))?;
        if !exit.is_open() {
            return Err(MovementError::ExitClosed(
                exit.connection.display_name().to_string(),
            ));
        }

        let destination = load_room(self.rooms.as_ref(), exit.target).await?;
        tracing::debug!(player_id = %actor.id, from = %here, to = %destination.id, "Player moving");

        Ok(relocate(self.players.as_ref(), actor, &destination).await?)
    }
}
