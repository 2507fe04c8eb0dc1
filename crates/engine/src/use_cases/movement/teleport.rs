//! Teleport use case. Moves the actor to any room by id, no exit needed.

use std::sync::Arc;

use mudlark_domain::{Message, PlayerId, RoomId};

use super::MovementError;
use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::ports::{PlayerRepo, RoomRepo};
use crate::use_cases::presence::{load_actor, relocate};

pub struct Teleport {
    players: Arc<dyn PlayerRepo>,
    rooms: Arc<dyn RoomRepo>,
    locks: Arc<EntityLocks>,
}

impl Teleport {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        rooms: Arc<dyn RoomRepo>,
        locks: Arc<EntityLocks>,
    ) -> Self {
        Self {
            players,
            rooms,
            locks,
        }
    }

    pub async fn execute(&self, actor_id: PlayerId, room: &str) -> Result<Vec<Message>, MovementError> {
        let room_id: RoomId = room
            .parse()
            .map_err(|_| MovementError::InvalidRoomId(room.to_string()))?;

        let _guard = self.locks.lock(actor_id).await;
        let actor = load_actor(self.players.as_ref(), actor_id).await?;
        let destination = self
            .rooms
            .get(room_id)
            .await?
            .ok_or(MovementError::NoSuchRoom(room_id))?;

        Ok(relocate(self.players.as_ref(), actor, &destination).await?)
    }
}
