//! Change room use case. Lets a room's creator rename or redescribe it.

use std::sync::Arc;

use mudlark_domain::{Message, PlayerId};

use super::BuildError;
use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::ports::{PlayerRepo, RoomRepo};
use crate::use_cases::presence::{load_actor, load_room};
use crate::use_cases::LookupError;

pub struct ChangeRoom {
    players: Arc<dyn PlayerRepo>,
    rooms: Arc<dyn RoomRepo>,
    locks: Arc<EntityLocks>,
}

impl ChangeRoom {
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

    /// Fields passed as `None` are left as they are.
    pub async fn execute(
        &self,
        actor_id: PlayerId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Vec<Message>, BuildError> {
        if name.is_none() && description.is_none() {
            return Err(BuildError::NothingToChange);
        }

        let actor = load_actor(self.players.as_ref(), actor_id).await?;
        let room_id = actor.current_room_id.ok_or(LookupError::InVoid)?;

        let _guard = self.locks.lock(room_id).await;
        let mut room = load_room(self.rooms.as_ref(), room_id).await?;
        if !room.is_created_by(actor.id) {
            return Err(BuildError::NotRoomCreator);
        }

        room.apply_changes(name, description);
        self.rooms.save(&room).await?;

        Ok(vec![Message::to(
            actor.id,
            "<ACTION>Successfully changed room.</ACTION>",
        )])
    }
}
